use super::{Canvas, Circle, Line, Rgb};
use crate::bounds::Dimensions;
use crate::error::EffectError;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint, Point,
    RadialGradient, Shader, SpreadMode, Stroke, Transform,
};

/// Halo strength at the rim of a blurred circle.
const GLOW_STRENGTH: f64 = 0.6;

fn color(rgb: Rgb, opacity: f64) -> Color {
    let mut color = Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255);
    color.set_alpha(opacity.clamp(0., 1.) as f32);
    color
}

fn pixmap_for(dimensions: Dimensions) -> Result<Pixmap, EffectError> {
    Pixmap::new(dimensions.width, dimensions.height).ok_or(EffectError::InvalidDimensions {
        width: dimensions.width,
        height: dimensions.height,
    })
}

/// Raster backed by a `tiny_skia::Pixmap` (premultiplied RGBA8888).
///
/// A zero-sized canvas has no pixmap and ignores drawing.
#[derive(Clone, Debug, Default)]
pub struct PixelCanvas {
    pixmap: Option<Pixmap>,
}

impl PixelCanvas {
    /// Fails when `dimensions` cannot back a pixmap, for instance when either
    /// side is zero.
    pub fn with_dimensions(dimensions: Dimensions) -> Result<PixelCanvas, EffectError> {
        Ok(PixelCanvas {
            pixmap: Some(pixmap_for(dimensions)?),
        })
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Straight-alpha colour at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(Rgb, f64)> {
        let pixel = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some((
            Rgb::new(pixel.red(), pixel.green(), pixel.blue()),
            pixel.alpha() as f64 / 255.,
        ))
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |pixmap| {
            pixmap.pixels().iter().filter(|p| p.alpha() != 0).count()
        })
    }
}

impl Canvas for PixelCanvas {
    fn reallocate(&mut self, dimensions: Dimensions) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            if pixmap.width() == dimensions.width && pixmap.height() == dimensions.height {
                pixmap.fill(Color::TRANSPARENT);
                return;
            }
        }
        self.pixmap = pixmap_for(dimensions).ok();
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(Color::TRANSPARENT);
        }
    }

    fn fill_circle(&mut self, circle: &Circle) {
        let pixmap = match self.pixmap.as_mut() {
            Some(pixmap) => pixmap,
            None => return,
        };
        let (cx, cy) = (circle.center.x as f32, circle.center.y as f32);
        let radius = circle.radius as f32;

        if circle.blur > 0. {
            let outer = radius + circle.blur as f32;
            let rim = color(circle.color, circle.opacity * GLOW_STRENGTH);
            let stops = vec![
                GradientStop::new(0., rim),
                GradientStop::new(radius / outer, rim),
                GradientStop::new(1., color(circle.color, 0.)),
            ];
            let center = Point::from_xy(cx, cy);
            let halo = RadialGradient::new(
                center,
                center,
                outer,
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            );
            if let (Some(shader), Some(path)) = (halo, PathBuilder::from_circle(cx, cy, outer)) {
                let paint = Paint {
                    shader,
                    anti_alias: true,
                    ..Paint::default()
                };
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }

        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            let mut paint = Paint::default();
            paint.set_color(color(circle.color, circle.opacity));
            paint.anti_alias = true;
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn stroke_line(&mut self, line: &Line) {
        let pixmap = match self.pixmap.as_mut() {
            Some(pixmap) => pixmap,
            None => return,
        };
        let from = Point::from_xy(line.from.x as f32, line.from.y as f32);
        let to = Point::from_xy(line.to.x as f32, line.to.y as f32);
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let path = match builder.finish() {
            Some(path) => path,
            None => return,
        };

        let (start, end) = (
            color(line.gradient.0, line.opacity),
            color(line.gradient.1, line.opacity),
        );
        let stops = vec![GradientStop::new(0., start), GradientStop::new(1., end)];
        let shader = LinearGradient::new(from, to, stops, SpreadMode::Pad, Transform::identity())
            .unwrap_or(Shader::SolidColor(start));
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        let stroke = Stroke {
            width: line.width as f32,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// One pixel layer placed at `offset` within the composed frame.
pub struct Layer<'a> {
    pub canvas: &'a PixelCanvas,
    pub offset: (i32, i32),
    pub opacity: f64,
}

/// Flattens `layers` in order over an opaque background.
pub fn compose_layers(
    dimensions: Dimensions,
    background: Rgb,
    layers: &[Layer],
) -> Result<Pixmap, EffectError> {
    let mut frame = pixmap_for(dimensions)?;
    frame.fill(color(background, 1.));
    for layer in layers {
        let opacity = layer.opacity.clamp(0., 1.) as f32;
        let pixmap = match layer.canvas.pixmap() {
            Some(pixmap) if opacity > 0. => pixmap,
            _ => continue,
        };
        frame.draw_pixmap(
            layer.offset.0,
            layer.offset.1,
            pixmap.as_ref(),
            &PixmapPaint {
                opacity,
                ..PixmapPaint::default()
            },
            Transform::identity(),
            None,
        );
    }
    Ok(frame)
}
