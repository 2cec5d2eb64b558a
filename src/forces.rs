use nalgebra::Vector2;

/// Radial push away from a point, linear in how deep inside the influence
/// radius the target is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repulsion {
    pub influence_radius: f64,
    pub strength: f64,
}

impl Repulsion {
    /// Velocity change for a body at `position` pushed away from `source`.
    ///
    /// `None` outside the influence radius. A body sitting exactly on the
    /// source has no direction to be pushed in and gets a zero impulse.
    pub fn impulse(&self, source: Vector2<f64>, position: Vector2<f64>) -> Option<Vector2<f64>> {
        let offset = position - source;
        let distance = offset.norm();
        if !(distance < self.influence_radius) {
            return None;
        }
        if distance <= f64::EPSILON {
            return Some(Vector2::zeros());
        }
        let force = (self.influence_radius - distance) / self.influence_radius;
        Some(offset / distance * force * self.strength)
    }
}

/// Rescales `velocity` down to `max_speed`, keeping its direction.
pub fn clamp_speed(velocity: &mut Vector2<f64>, max_speed: f64) {
    let speed = velocity.norm();
    if speed > max_speed {
        *velocity *= max_speed / speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPULSION: Repulsion = Repulsion {
        influence_radius: 120.,
        strength: 0.3,
    };

    #[test]
    fn pushes_away_from_source() {
        let impulse = REPULSION
            .impulse(Vector2::new(0., 0.), Vector2::new(60., 0.))
            .unwrap();
        assert!((impulse.x - 0.15).abs() < 1e-12);
        assert_eq!(impulse.y, 0.);
    }

    #[test]
    fn no_force_outside_influence() {
        assert_eq!(
            REPULSION.impulse(Vector2::new(0., 0.), Vector2::new(120., 0.)),
            None
        );
        assert_eq!(
            REPULSION.impulse(Vector2::new(f64::NAN, 0.), Vector2::new(1., 0.)),
            None
        );
    }

    #[test]
    fn coincident_points_get_no_push() {
        let impulse = REPULSION
            .impulse(Vector2::new(5., 5.), Vector2::new(5., 5.))
            .unwrap();
        assert_eq!(impulse, Vector2::zeros());
    }

    #[test]
    fn clamp_keeps_direction() {
        let mut v = Vector2::new(3., 4.);
        clamp_speed(&mut v, 2.);
        assert!((v.norm() - 2.).abs() < 1e-12);
        assert!((v.x / v.y - 0.75).abs() < 1e-12);
    }
}
