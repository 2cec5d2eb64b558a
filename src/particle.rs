use crate::render::Rgb;
use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Remaining life, from 1.0 down to 0.0.
    pub life: f64,
    /// Frames the particle lives for.
    pub life_span: f64,
    pub radius: f64,
    pub color: Rgb,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.
    }
}
