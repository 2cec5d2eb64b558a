//! Drawing surfaces shared by both effects.
//!
//! A [`RenderSurface`] owns the pixel dimensions of one effect's surface and
//! forwards a small set of primitives to a backend [`Canvas`]. A surface whose
//! canvas could not be acquired still tracks its dimensions but drops every
//! draw call.

pub mod pixel;
#[cfg(feature = "sdl")]
pub mod present;
pub mod recording;

pub use pixel::{compose_layers, Layer, PixelCanvas};
pub use recording::{DrawCommand, RecordingCanvas};

use crate::bounds::Dimensions;
use crate::error::EffectError;
use log::{debug, warn};
use nalgebra::Vector2;

pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// A filled disc. `blur > 0` adds a soft halo of that many pixels around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub blur: f64,
}

/// A stroked segment whose colour runs from `gradient.0` at `from` to
/// `gradient.1` at `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub gradient: (Rgb, Rgb),
    pub width: f64,
    pub opacity: f64,
}

/// Raster backend behind a [`RenderSurface`].
pub trait Canvas {
    /// Drops the current raster and allocates one of the new size.
    fn reallocate(&mut self, dimensions: Dimensions);
    fn clear(&mut self);
    fn fill_circle(&mut self, circle: &Circle);
    fn stroke_line(&mut self, line: &Line);
}

pub struct RenderSurface<C> {
    dimensions: Dimensions,
    canvas: Option<C>,
}

impl<C: Canvas> RenderSurface<C> {
    pub fn new(dimensions: Dimensions, mut canvas: C) -> RenderSurface<C> {
        canvas.reallocate(dimensions);
        RenderSurface {
            dimensions,
            canvas: Some(canvas),
        }
    }

    /// Wraps the outcome of acquiring a canvas. A failure is logged and
    /// yields a surface that draws nothing.
    pub fn acquire(dimensions: Dimensions, canvas: Result<C, EffectError>) -> RenderSurface<C> {
        match canvas {
            Ok(canvas) => RenderSurface::new(dimensions, canvas),
            Err(err) => {
                warn!("Drawing surface unavailable, effect disabled: {}", err);
                RenderSurface::unavailable(dimensions)
            }
        }
    }

    pub fn unavailable(dimensions: Dimensions) -> RenderSurface<C> {
        RenderSurface {
            dimensions,
            canvas: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    /// Resizing discards the raster contents; the next frame redraws fully.
    pub fn resize(&mut self, dimensions: Dimensions) {
        debug!(
            "Resizing surface {}x{} -> {}x{}",
            self.dimensions.width, self.dimensions.height, dimensions.width, dimensions.height
        );
        self.dimensions = dimensions;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.reallocate(dimensions);
        }
    }

    pub fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
    }

    pub fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Rgb, opacity: f64) {
        self.fill_glowing_circle(center, radius, color, opacity, 0.);
    }

    pub fn fill_glowing_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Rgb,
        opacity: f64,
        blur: f64,
    ) {
        let canvas = match self.canvas.as_mut() {
            Some(canvas) => canvas,
            None => return,
        };
        let opacity = match visible(opacity) {
            Some(opacity) => opacity,
            None => return,
        };
        if !(radius > 0.) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        canvas.fill_circle(&Circle {
            center,
            radius,
            color,
            opacity,
            blur: blur.max(0.),
        });
    }

    pub fn draw_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        gradient: (Rgb, Rgb),
        width: f64,
        opacity: f64,
    ) {
        let canvas = match self.canvas.as_mut() {
            Some(canvas) => canvas,
            None => return,
        };
        let opacity = match visible(opacity) {
            Some(opacity) => opacity,
            None => return,
        };
        if !(width > 0.) || from == to {
            return;
        }
        canvas.stroke_line(&Line {
            from,
            to,
            gradient,
            width,
            opacity,
        });
    }
}

fn visible(opacity: f64) -> Option<f64> {
    if opacity.is_finite() && opacity > 0. {
        Some(opacity.min(1.))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn unavailable_surface_drops_everything() {
        let mut surface = RenderSurface::<RecordingCanvas>::acquire(
            Dimensions::new(10, 10),
            Err(EffectError::SurfaceUnavailable("no context".to_string())),
        );
        assert!(!surface.is_available());
        surface.clear();
        surface.fill_circle(Vector2::new(1., 1.), 1., WHITE, 1.);
        surface.resize(Dimensions::new(20, 5));
        assert_eq!(surface.dimensions(), Dimensions::new(20, 5));
        assert!(surface.canvas().is_none());
    }

    #[test]
    fn invisible_primitives_are_skipped() {
        let mut surface = RenderSurface::new(Dimensions::new(10, 10), RecordingCanvas::default());
        surface.fill_circle(Vector2::new(1., 1.), 1., WHITE, 0.);
        surface.fill_circle(Vector2::new(1., 1.), 1., WHITE, f64::NAN);
        surface.fill_circle(Vector2::new(1., 1.), 0., WHITE, 1.);
        surface.draw_line(Vector2::new(1., 1.), Vector2::new(1., 1.), (WHITE, WHITE), 1., 1.);
        surface.draw_line(Vector2::new(1., 1.), Vector2::new(2., 1.), (WHITE, WHITE), 1., 2.);
        let canvas = surface.canvas().unwrap();
        assert_eq!(canvas.draw_calls(), 1);
        assert_eq!(canvas.lines()[0].opacity, 1.);
    }

    #[test]
    fn color_lerp_hits_both_ends() {
        let a = Rgb::new(0, 245, 255);
        let b = Rgb::new(124, 58, 237);
        assert_eq!(a.lerp(b, 0.), a);
        assert_eq!(a.lerp(b, 1.), b);
    }
}
