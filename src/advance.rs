use crate::{
    bounds::Dimensions,
    burst::BurstConfig,
    field::FieldConfig,
    forces::clamp_speed,
    node::Node,
    particle::Particle,
};
use nalgebra::Vector2;
use rand::Rng;

/// One frame of node motion: drift, pointer push or damping, then reflection
/// off the surface edges.
pub fn advance_single_node<R: Rng>(
    node: &mut Node,
    dimensions: Dimensions,
    pointer: Vector2<f64>,
    config: &FieldConfig,
    rng: &mut R,
) {
    node.position += node.velocity;

    match config.repulsion().impulse(pointer, node.position) {
        Some(impulse) => {
            node.velocity += impulse;
            clamp_speed(&mut node.velocity, config.max_speed);
        }
        None => {
            node.velocity *= config.damping;
            // Keep the field from settling.
            let nudge = config.drift_nudge;
            if node.velocity.x.abs() < config.drift_epsilon && nudge > 0. {
                node.velocity.x += rng.gen_range(-nudge..nudge);
            }
            if node.velocity.y.abs() < config.drift_epsilon && nudge > 0. {
                node.velocity.y += rng.gen_range(-nudge..nudge);
            }
        }
    }

    dimensions.reflect(node.position, &mut node.velocity);
}

/// Ballistic step with gravity and horizontal drag. Dead particles are left
/// untouched.
pub fn advance_single_particle(particle: &mut Particle, config: &BurstConfig) {
    if !particle.is_alive() {
        return;
    }
    particle.position += particle.velocity;
    particle.velocity.y += config.gravity;
    particle.velocity.x *= config.drag;
    let decay = if particle.life_span > 0. {
        1. / particle.life_span
    } else {
        1.
    };
    particle.life = (particle.life - decay).max(0.);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::NO_POINTER;
    use crate::render::Rgb;
    use crate::world_gen::seeded_rng;

    fn node(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        Node {
            position: Vector2::new(x, y),
            velocity: Vector2::new(vx, vy),
            radius: 1.,
            opacity: 0.5,
        }
    }

    #[test]
    fn drifting_node_is_damped() {
        let mut n = node(10., 10., 0.2, -0.2);
        advance_single_node(
            &mut n,
            Dimensions::new(100, 100),
            NO_POINTER,
            &FieldConfig::default(),
            &mut seeded_rng(1),
        );
        assert!((n.position - Vector2::new(10.2, 9.8)).norm() < 1e-12);
        assert!((n.velocity.x - 0.199).abs() < 1e-12);
        assert!((n.velocity.y + 0.199).abs() < 1e-12);
    }

    #[test]
    fn slow_node_gets_nudged_within_bounds() {
        let mut n = node(10., 10., 0., 0.);
        advance_single_node(
            &mut n,
            Dimensions::new(100, 100),
            NO_POINTER,
            &FieldConfig::default(),
            &mut seeded_rng(1),
        );
        assert!(n.velocity.x.abs() <= 0.025 && n.velocity.y.abs() <= 0.025);
    }

    #[test]
    fn pointer_on_top_of_node_leaves_velocity_finite() {
        let mut n = node(50., 50., 0., 0.);
        advance_single_node(
            &mut n,
            Dimensions::new(100, 100),
            Vector2::new(50., 50.),
            &FieldConfig::default(),
            &mut seeded_rng(1),
        );
        assert_eq!(n.velocity, Vector2::zeros());
    }

    #[test]
    fn node_leaving_the_left_edge_turns_back() {
        let mut n = node(0.1, 50., -0.3, 0.);
        advance_single_node(
            &mut n,
            Dimensions::new(100, 100),
            NO_POINTER,
            &FieldConfig::default(),
            &mut seeded_rng(1),
        );
        assert!(n.position.x < 0.);
        assert!(n.velocity.x > 0.);
    }

    #[test]
    fn particle_falls_and_fades() {
        let mut p = Particle {
            position: Vector2::new(0., 0.),
            velocity: Vector2::new(2., 0.),
            life: 1.,
            life_span: 4.,
            radius: 2.,
            color: Rgb::new(0, 245, 255),
        };
        let config = BurstConfig::default();
        advance_single_particle(&mut p, &config);
        assert_eq!(p.position, Vector2::new(2., 0.));
        assert!((p.velocity.x - 1.98).abs() < 1e-12);
        assert!((p.velocity.y - 0.04).abs() < 1e-12);
        assert_eq!(p.life, 0.75);
        for _ in 0..3 {
            advance_single_particle(&mut p, &config);
        }
        assert_eq!(p.life, 0.);
        let resting = p;
        advance_single_particle(&mut p, &config);
        assert_eq!(p, resting);
    }
}
