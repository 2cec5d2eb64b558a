use nalgebra::Vector2;

/// Pixel size of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.width as f64 / 2., self.height as f64 / 2.)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, point: Vector2<f64>, slack: f64) -> bool {
        point.x >= -slack
            && point.x <= self.width as f64 + slack
            && point.y >= -slack
            && point.y <= self.height as f64 + slack
    }

    /// Hard reflection off the surface edges.
    ///
    /// A velocity component is inverted only while the position lies outside
    /// `[0, width]` (resp. `[0, height]`) and the component still points
    /// outward. The position itself is never clamped, so it may overshoot an
    /// edge by one frame's travel.
    pub fn reflect(&self, position: Vector2<f64>, velocity: &mut Vector2<f64>) {
        let (w, h) = (self.width as f64, self.height as f64);
        if (position.x < 0. && velocity.x < 0.) || (position.x > w && velocity.x > 0.) {
            velocity.x = -velocity.x;
        }
        if (position.y < 0. && velocity.y < 0.) || (position.y > h && velocity.y > 0.) {
            velocity.y = -velocity.y;
        }
    }
}
