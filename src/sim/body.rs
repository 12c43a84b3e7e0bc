//! The runner body
//!
//! Integrates position, velocity and spin for one frame. The body never
//! probes the terrain itself: `grounded` is cleared after every integration
//! step and only the collision pass may set it again via [`Body::land_on`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::particle::ParticleField;
use super::tick::TickInput;
use crate::tuning::BodyTuning;
use crate::{normalize_angle, snap_angle};

/// The player-controlled body
#[derive(Debug, Clone)]
pub struct Body {
    /// Top-left corner of the visual box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in radians, kept in (-π, π]
    pub angle: f32,
    /// `pos.y` at the start of the current frame
    pub prev_y: f32,
    /// Supported by a surface; only valid until the next `advance`
    pub grounded: bool,
    /// Trail and death burst (render only)
    pub particles: ParticleField,
    params: BodyTuning,
    fx_rng: Pcg32,
}

impl Body {
    /// Create a body at its spawn point. `fx_seed` drives cosmetic effects only.
    pub fn new(params: BodyTuning, fx_seed: u64) -> Self {
        let mut body = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            prev_y: 0.0,
            grounded: false,
            particles: ParticleField::default(),
            params,
            fx_rng: Pcg32::seed_from_u64(fx_seed),
        };
        body.respawn();
        body
    }

    /// Put the body back at spawn, airborne and running
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(self.params.spawn_x, self.params.spawn_y);
        self.vel = Vec2::new(self.params.run_speed, 0.0);
        self.angle = 0.0;
        self.prev_y = self.pos.y;
        self.grounded = false;
        self.particles.clear();
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.params.size
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.params.size
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    /// Bottom edge at the start of the frame
    pub fn prev_bottom(&self) -> f32 {
        self.prev_y + self.height()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width(), self.height()) * 0.5
    }

    /// Visual bounding box (unrotated)
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width(), self.height())
    }

    /// Advance one frame
    pub fn advance(&mut self, dt: f32, input: &TickInput) {
        self.prev_y = self.pos.y;

        self.pos.x += self.vel.x * dt;

        if input.pressed && self.grounded {
            self.jump();
        }

        self.vel.y += self.params.gravity * dt;
        self.pos.y += self.vel.y * dt;

        if !self.grounded {
            self.angle += self.params.spin_rate * dt;
        }
        self.angle = normalize_angle(self.angle);

        // Support is re-established by the collision pass, never here
        self.grounded = false;

        let (center, size) = (self.center(), self.width());
        self.particles
            .emit_trail(center, self.vel.x, self.angle, size, &mut self.fx_rng);
        self.particles.update(dt, self.params.gravity);
    }

    /// Rest on a surface whose top edge is at `surface_top`
    pub fn land_on(&mut self, surface_top: f32) {
        self.grounded = true;
        self.vel.y = 0.0;
        self.pos.y = surface_top - self.height();
        self.angle = snap_angle(self.angle, self.params.snap_angle);
    }

    pub fn jump(&mut self) {
        self.vel.y = self.params.launch_speed;
        self.grounded = false;
    }

    /// Stop forward motion; the body keeps its pose and falls in place
    pub fn kill(&mut self) {
        self.vel.x = 0.0;
    }

    pub fn emit_death_burst(&mut self) {
        let center = self.center();
        self.particles.emit_burst(center, &mut self.fx_rng);
    }

    /// Age particles without moving the body
    pub fn update_particles(&mut self, dt: f32) {
        self.particles.update(dt, self.params.gravity);
    }
}
