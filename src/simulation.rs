use crate::bounds::Dimensions;
use crate::render::{Canvas, RenderSurface};

/// What a simulation gets to see of the frame it is stepped in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Read from the surface at the start of the tick.
    pub dimensions: Dimensions,
    pub timestamp_ms: f64,
}

/// A frame-driven effect: stepped once per tick, then drawn.
///
/// `step` for every entity finishes before `render` is called, so a frame
/// never mixes old and new positions.
pub trait Simulation {
    fn step(&mut self, frame: &Frame);

    fn render<C: Canvas>(&self, surface: &mut RenderSurface<C>);

    /// Whether the simulation wants another tick after this one.
    fn is_active(&self) -> bool;
}
