//! One-shot particle burst.
//!
//! `Idle -> Running -> Completed`. The batch is spawned on activation at the
//! surface center and the burst completes once every particle has faded or
//! the frame cap is hit. Activating again, in any state but `Idle`, does
//! nothing: a new burst needs a new instance.

use crate::{
    advance::advance_single_particle,
    bounds::Dimensions,
    particle::Particle,
    render::{Canvas, RenderSurface, Rgb},
    simulation::{Frame, Simulation},
    world_gen::init_particles,
};
use log::debug;
use rand::Rng;
use rand_pcg::Pcg64;
use std::ops::Range;

pub const PALETTE: [Rgb; 5] = [
    Rgb::new(0x00, 0xf5, 0xff),
    Rgb::new(0x7c, 0x3a, 0xed),
    Rgb::new(0x10, 0xb9, 0x81),
    Rgb::new(0xf5, 0x9e, 0x0b),
    Rgb::new(0xec, 0x48, 0x99),
];

#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    pub particle_count: usize,
    pub speed: Range<f64>,
    /// In frames.
    pub life_span: Range<f64>,
    pub radius: Range<f64>,
    pub palette: Vec<Rgb>,
    pub gravity: f64,
    /// Applied to the horizontal velocity only.
    pub drag: f64,
    pub frame_cap: u32,
    pub glow_blur: f64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        BurstConfig {
            particle_count: 80,
            speed: 1.0..5.0,
            life_span: 40.0..120.0,
            radius: 1.0..4.0,
            palette: PALETTE.to_vec(),
            gravity: 0.04,
            drag: 0.99,
            frame_cap: 200,
            glow_blur: 8.,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstState {
    Idle,
    Running,
    Completed,
}

pub struct ParticleBurst<R = Pcg64> {
    config: BurstConfig,
    state: BurstState,
    particles: Vec<Particle>,
    frames: u32,
    rng: R,
}

impl<R: Rng> ParticleBurst<R> {
    pub fn new(config: BurstConfig, rng: R) -> ParticleBurst<R> {
        ParticleBurst {
            config,
            state: BurstState::Idle,
            particles: Vec::new(),
            frames: 0,
            rng,
        }
    }

    /// Spawns the batch around the center of `dimensions`. Returns `false`,
    /// changing nothing, unless the burst was idle.
    pub fn activate(&mut self, dimensions: Dimensions) -> bool {
        if self.state != BurstState::Idle {
            debug!("Burst already {:?}, ignoring activation", self.state);
            return false;
        }
        self.particles = init_particles(dimensions.center(), &self.config, &mut self.rng);
        self.state = BurstState::Running;
        debug!("Burst of {} particles started", self.particles.len());
        true
    }

    pub fn state(&self) -> BurstState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn alive(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }
}

impl<R: Rng> Simulation for ParticleBurst<R> {
    fn step(&mut self, _frame: &Frame) {
        if self.state != BurstState::Running {
            return;
        }
        for particle in self.particles.iter_mut() {
            advance_single_particle(particle, &self.config);
        }
        self.frames += 1;
        let alive = self.alive();
        if alive == 0 || self.frames >= self.config.frame_cap {
            debug!(
                "Burst completed after {} frames with {} particles left",
                self.frames, alive
            );
            self.state = BurstState::Completed;
        }
    }

    fn render<C: Canvas>(&self, surface: &mut RenderSurface<C>) {
        for particle in self.particles.iter().filter(|p| p.is_alive()) {
            surface.fill_glowing_circle(
                particle.position,
                particle.radius,
                particle.color,
                particle.life,
                self.config.glow_blur,
            );
        }
    }

    fn is_active(&self) -> bool {
        self.state == BurstState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;
    use crate::world_gen::seeded_rng;

    fn frame() -> Frame {
        Frame {
            dimensions: Dimensions::new(200, 100),
            timestamp_ms: 0.,
        }
    }

    #[test]
    fn idle_burst_has_nothing() {
        let mut burst = ParticleBurst::new(BurstConfig::default(), seeded_rng(1));
        burst.step(&frame());
        assert_eq!(burst.state(), BurstState::Idle);
        assert!(burst.particles().is_empty());
        assert!(!burst.is_active());
        assert_eq!(burst.frames(), 0);
    }

    #[test]
    fn activation_spawns_at_center() {
        let mut burst = ParticleBurst::new(BurstConfig::default(), seeded_rng(1));
        assert!(burst.activate(Dimensions::new(200, 100)));
        assert_eq!(burst.state(), BurstState::Running);
        assert_eq!(burst.particles().len(), 80);
        assert!(burst
            .particles()
            .iter()
            .all(|p| p.position == nalgebra::Vector2::new(100., 50.)));
    }

    #[test]
    fn frame_cap_ends_the_burst() {
        let config = BurstConfig {
            particle_count: 3,
            life_span: 1000.0..1001.0,
            frame_cap: 5,
            ..BurstConfig::default()
        };
        let mut burst = ParticleBurst::new(config, seeded_rng(9));
        burst.activate(Dimensions::new(10, 10));
        for _ in 0..4 {
            burst.step(&frame());
            assert_eq!(burst.state(), BurstState::Running);
        }
        burst.step(&frame());
        assert_eq!(burst.state(), BurstState::Completed);
        assert_eq!(burst.alive(), 3);
        let snapshot = burst.particles().to_vec();
        burst.step(&frame());
        assert_eq!(burst.particles(), &snapshot[..]);
        assert_eq!(burst.frames(), 5);
    }

    #[test]
    fn renders_live_particles_with_life_as_opacity() {
        let mut burst = ParticleBurst::new(BurstConfig::default(), seeded_rng(4));
        burst.activate(Dimensions::new(200, 100));
        burst.step(&frame());
        let mut surface = RenderSurface::new(Dimensions::new(200, 100), RecordingCanvas::default());
        burst.render(&mut surface);
        let circles = surface.canvas().unwrap().circles();
        assert_eq!(circles.len(), 80);
        for (circle, particle) in circles.iter().zip(burst.particles()) {
            assert_eq!(circle.opacity, particle.life);
            assert_eq!(circle.blur, 8.);
        }
    }
}
