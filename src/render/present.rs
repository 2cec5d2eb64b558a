use super::DisplayConfig;
use crate::bounds::Dimensions;
use crate::error::EffectError;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use sdl2::EventPump;
use tiny_skia::Pixmap;

/// SDL's name for bytes laid out R, G, B, A in memory.
const FRAME_FORMAT: PixelFormatEnum = if cfg!(target_endian = "little") {
    PixelFormatEnum::ABGR8888
} else {
    PixelFormatEnum::RGBA8888
};

fn presenter<E: std::fmt::Display>(err: E) -> EffectError {
    EffectError::Presenter(err.to_string())
}

/// SDL window that shows composed frames.
pub struct Window {
    pub sdl_context: sdl2::Sdl,
    canvas: WindowCanvas,
}

impl Window {
    pub fn open(title: &str, config: &DisplayConfig) -> Result<Window, EffectError> {
        if config.width == 0 || config.height == 0 {
            return Err(EffectError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let sdl_context = sdl2::init().map_err(presenter)?;
        let video_subsystem = sdl_context.video().map_err(presenter)?;
        let window = video_subsystem
            .window(title, config.width, config.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(presenter)?;
        Ok(Window {
            sdl_context,
            canvas: window.into_canvas().build().map_err(presenter)?,
        })
    }

    pub fn event_pump(&self) -> Result<EventPump, EffectError> {
        self.sdl_context.event_pump().map_err(presenter)
    }

    pub fn texture_creator(&self) -> TextureCreator<WindowContext> {
        self.canvas.texture_creator()
    }

    /// Uploads `frame` into `texture` and flips it onto the window.
    pub fn present(
        &mut self,
        texture: &mut FrameTexture<'_>,
        frame: &Pixmap,
    ) -> Result<(), EffectError> {
        let texture = match texture.upload(frame)? {
            Some(texture) => texture,
            None => return Ok(()),
        };
        self.canvas.copy(texture, None, None).map_err(presenter)?;
        self.canvas.present();
        Ok(())
    }
}

/// Streaming texture reused across frames and rebuilt only when the frame
/// size changes.
pub struct FrameTexture<'a> {
    creator: &'a TextureCreator<WindowContext>,
    cached: Option<(Dimensions, Texture<'a>)>,
}

impl<'a> FrameTexture<'a> {
    pub fn new(creator: &'a TextureCreator<WindowContext>) -> FrameTexture<'a> {
        FrameTexture {
            creator,
            cached: None,
        }
    }

    fn upload(&mut self, frame: &Pixmap) -> Result<Option<&Texture<'a>>, EffectError> {
        let dimensions = Dimensions::new(frame.width(), frame.height());
        if dimensions.is_empty() {
            return Ok(None);
        }
        let stale = !matches!(&self.cached, Some((cached, _)) if *cached == dimensions);
        if stale {
            let texture = self
                .creator
                .create_texture_streaming(FRAME_FORMAT, dimensions.width, dimensions.height)
                .map_err(presenter)?;
            self.cached = Some((dimensions, texture));
        }
        match self.cached.as_mut() {
            Some((_, texture)) => {
                texture
                    .update(None, frame.data(), dimensions.width as usize * 4)
                    .map_err(presenter)?;
                Ok(Some(&*texture))
            }
            None => Ok(None),
        }
    }
}
