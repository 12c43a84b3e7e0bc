//! Cosmetic particles: the run trail and the death burst
//!
//! Nothing here feeds back into gameplay. Particles only drift, shrink and
//! expire.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{BURST_COUNT, BURST_LIFETIME, TRAIL_LIFETIME, TRAIL_MAX};

/// Which effect a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Trail,
    Burst,
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub angle: f32,
    /// Index into the renderer's two-color neon palette
    pub palette: u8,
}

impl Particle {
    /// Remaining life as 0..=1, for fading
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// All live particles owned by one body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleField {
    pub trail: Vec<Particle>,
    pub burst: Vec<Particle>,
}

impl ParticleField {
    pub fn len(&self) -> usize {
        self.trail.len() + self.burst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty() && self.burst.is_empty()
    }

    pub fn clear(&mut self) {
        self.trail.clear();
        self.burst.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.trail.iter().chain(self.burst.iter())
    }

    /// Drop a trail square behind a body moving at `run_speed`
    pub fn emit_trail<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        run_speed: f32,
        angle: f32,
        body_size: f32,
        rng: &mut R,
    ) {
        self.trail.push(Particle {
            kind: ParticleKind::Trail,
            pos: origin,
            vel: Vec2::new(-run_speed * 0.05, (rng.random::<f32>() - 0.5) * 20.0),
            life: TRAIL_LIFETIME,
            max_life: TRAIL_LIFETIME,
            size: (body_size * 0.6).max(4.0),
            angle,
            palette: rng.random_range(0..2),
        });
        if self.trail.len() > TRAIL_MAX {
            self.trail.remove(0);
        }
    }

    /// Scatter debris from `origin`, biased upward
    pub fn emit_burst<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        for _ in 0..BURST_COUNT {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 100.0 + rng.random::<f32>() * 200.0;
            self.burst.push(Particle {
                kind: ParticleKind::Burst,
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed * 0.5 - 80.0),
                life: BURST_LIFETIME,
                max_life: BURST_LIFETIME,
                size: 6.0 + rng.random::<f32>() * 6.0,
                angle: 0.0,
                palette: rng.random_range(0..2),
            });
        }
    }

    /// Age every particle by `dt` and drop the expired ones
    pub fn update(&mut self, dt: f32, gravity: f32) {
        for p in &mut self.trail {
            p.life -= dt;
            p.pos += p.vel * dt;
            p.size *= 1.0 - dt * 3.0;
        }
        self.trail.retain(|p| p.life > 0.0 && p.size > 0.5);

        for p in &mut self.burst {
            p.life -= dt;
            p.vel.y += gravity * 0.5 * dt;
            p.pos += p.vel * dt;
            p.size *= 1.0 - dt * 1.5;
        }
        self.burst.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_trail_is_capped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ParticleField::default();
        for _ in 0..50 {
            field.emit_trail(Vec2::ZERO, 300.0, 0.0, 57.6, &mut rng);
        }
        assert_eq!(field.trail.len(), TRAIL_MAX);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut field = ParticleField::default();
        field.emit_trail(Vec2::ZERO, 300.0, 0.0, 57.6, &mut rng);
        field.emit_burst(Vec2::new(10.0, 10.0), &mut rng);
        assert_eq!(field.len(), 1 + BURST_COUNT);

        field.update(0.2, 1800.0);
        assert_eq!(field.trail.len(), 1);
        assert!(field.trail[0].alpha() < 1.0);

        for _ in 0..10 {
            field.update(0.1, 1800.0);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn test_burst_falls() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ParticleField::default();
        field.emit_burst(Vec2::ZERO, &mut rng);
        let before: Vec<f32> = field.burst.iter().map(|p| p.vel.y).collect();
        field.update(0.1, 1800.0);
        for (p, vy) in field.burst.iter().zip(before) {
            assert!((p.vel.y - (vy + 90.0)).abs() < 1e-3);
        }
    }
}
