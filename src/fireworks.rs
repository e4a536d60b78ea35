//! Fireworks particle simulation, triggered when the show completes a loop.

use std::f32::consts::{PI, TAU};

use glam::{Vec3, Vec4};
use rand::Rng;

use crate::show::DronePoint;

/// Downward acceleration applied to particles, in units per second squared.
const GRAVITY: f32 = 20.0;
/// Cap on explosion centers per burst.
const MAX_EXPLOSIONS: usize = 15;
/// Particles per explosion, lower bound inclusive, upper exclusive.
const PARTICLES_PER_EXPLOSION: std::ops::Range<u32> = 100..150;
/// Initial particle speed range, units per second.
const SPEED_RANGE: std::ops::Range<f32> = 50.0..200.0;
/// Particle lifetime range, seconds.
const LIFETIME_RANGE: std::ops::Range<f32> = 1.5..3.5;

/// One short-lived spark.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// RGBA color.
    pub color: Vec4,
    /// Seconds until this particle is removed.
    pub lifetime_s: f32,
}

/// Owns and integrates the live particle set.
///
/// Storage grows and shrinks with each burst; there is no pooling, and
/// particle order carries no meaning.
#[derive(Debug, Default)]
pub struct Fireworks {
    particles: Vec<Particle>,
}

impl Fireworks {
    /// Empty simulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live particles with a fresh burst over the final
    /// formation.
    ///
    /// Spawns `min(15, points.len())` explosions, each centered on a
    /// uniformly random point of `points`, each emitting 100 to 149
    /// particles on hemisphere directions with a shared color. One shell in
    /// five is pure white. No-op when `points` is empty.
    pub fn burst<R: Rng>(&mut self, points: &[DronePoint], rng: &mut R) {
        if points.is_empty() {
            return;
        }
        self.particles.clear();

        let explosions = points.len().min(MAX_EXPLOSIONS);
        for _ in 0..explosions {
            let center =
                points[rng.random_range(0..points.len())].position;
            let mut color = Vec4::new(
                rng.random::<f32>(),
                rng.random::<f32>(),
                rng.random::<f32>(),
                1.0,
            );
            if rng.random_range(0..5) == 0 {
                color = Vec4::ONE;
            }

            let count = rng.random_range(PARTICLES_PER_EXPLOSION);
            for _ in 0..count {
                let speed = rng.random_range(SPEED_RANGE);
                let polar = rng.random_range(0.0..PI);
                let azimuth = rng.random_range(0.0..TAU);
                let velocity = Vec3::new(
                    speed * polar.sin() * azimuth.cos(),
                    speed * polar.cos(),
                    speed * polar.sin() * azimuth.sin(),
                );
                self.particles.push(Particle {
                    position: center,
                    velocity,
                    color,
                    lifetime_s: rng.random_range(LIFETIME_RANGE),
                });
            }
        }
    }

    /// Ballistic integration over an already speed-scaled delta, dropping
    /// particles whose lifetime has run out.
    pub fn step(&mut self, dt_s: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt_s;
            p.velocity.y -= GRAVITY * dt_s;
            p.lifetime_s -= dt_s;
        }
        self.particles.retain(|p| p.lifetime_s > 0.0);
    }

    /// Live particles, in no particular order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop all live particles, as a show reload does.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
