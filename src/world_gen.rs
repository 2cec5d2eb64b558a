use crate::{
    bounds::Dimensions,
    burst::BurstConfig,
    field::FieldConfig,
    node::Node,
    particle::Particle,
};
use nalgebra::Vector2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::ops::Range;

/// Generator for production use, seeded from the operating system.
pub fn entropy_rng() -> Pcg64 {
    Pcg64::from_entropy()
}

pub fn seeded_rng(seed: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed)
}

/// Uniform in `[start, end)`. An empty range yields `start` instead of
/// panicking.
pub fn sample<R: Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

pub fn node_count(dimensions: Dimensions, config: &FieldConfig) -> usize {
    if !(config.density > 0.) {
        return 0;
    }
    ((dimensions.area() / config.density).floor() as usize).min(config.max_nodes)
}

pub fn init_nodes<R: Rng>(dimensions: Dimensions, config: &FieldConfig, rng: &mut R) -> Vec<Node> {
    let n_nodes = node_count(dimensions, config);
    let drift = -config.drift_speed..config.drift_speed;
    let mut nodes = std::vec::Vec::<Node>::new();
    nodes.reserve(n_nodes);
    while nodes.len() < n_nodes {
        nodes.push(Node {
            position: Vector2::new(
                sample(rng, &(0.0..dimensions.width as f64)),
                sample(rng, &(0.0..dimensions.height as f64)),
            ),
            velocity: Vector2::new(sample(rng, &drift), sample(rng, &drift)),
            radius: sample(rng, &config.radius),
            opacity: sample(rng, &config.opacity),
        });
    }
    nodes
}

/// One burst batch, all starting at `center`.
pub fn init_particles<R: Rng>(
    center: Vector2<f64>,
    config: &BurstConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let mut particles = std::vec::Vec::<Particle>::new();
    particles.reserve(config.particle_count);
    while particles.len() < config.particle_count {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = sample(rng, &config.speed);
        let color = if config.palette.is_empty() {
            crate::burst::PALETTE[0]
        } else {
            config.palette[rng.gen_range(0..config.palette.len())]
        };
        particles.push(Particle {
            position: center,
            velocity: Vector2::new(speed * angle.cos(), speed * angle.sin()),
            life: 1.,
            life_span: sample(rng, &config.life_span),
            radius: sample(rng, &config.radius),
            color,
        });
    }
    particles
}
