//! Run state
//!
//! Everything the frame loop mutates lives in one `RunState`, created once
//! at startup and reset in place between attempts.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::DeathCause;
use super::course::{Course, Obstacle};
use crate::tuning::{Tuning, TuningError};

/// Lifecycle of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Body is running; every tick simulates
    Active,
    /// Lost; waiting for reset
    Dead,
    /// Reached the finish line; waiting for reset
    Complete,
}

/// Something that happened during the latest tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Landed { top: f32 },
    Jumped,
    Died(DeathCause),
    Finished,
}

pub const STATUS_DEAD: &str = "You died - click or tap to restart";
pub const STATUS_COMPLETE: &str = "Course complete - click or tap to play again";

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed of the course stream
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub body: Body,
    pub course: Course,
    /// Distance travelled this attempt (body x)
    pub progress: f32,
    /// Left edge of the view window
    pub view_x: f32,
    /// Simulated frames this attempt
    pub time_ticks: u64,
    /// Attempts started since creation, including the current one
    pub attempt: u32,
    pub death: Option<DeathCause>,
    /// Events raised by the latest tick
    pub events: Vec<RunEvent>,
    /// Course stream; every reset rolls the next layout from it
    rng: Pcg32,
    /// Scratch buffer for the per-frame collider query
    pub(crate) colliders: Vec<Obstacle>,
}

impl RunState {
    /// Create a run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a run with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let course = Course::generate(tuning.course, tuning.run.ground_y(), &mut rng);
        // Cosmetic stream is split off so effects never shift the course sequence
        let fx_seed = seed.wrapping_mul(2654435761).wrapping_add(1);
        log::info!("Run created with seed {}", seed);
        Self {
            seed,
            tuning,
            phase: RunPhase::Active,
            body: Body::new(tuning.body, fx_seed),
            course,
            progress: 0.0,
            view_x: 0.0,
            time_ticks: 0,
            attempt: 1,
            death: None,
            events: Vec::new(),
            rng,
            colliders: Vec::new(),
        }
    }

    /// Start a new attempt on a freshly generated course
    pub fn reset(&mut self) {
        self.body.respawn();
        self.course.regenerate(&mut self.rng);
        self.progress = 0.0;
        self.view_x = 0.0;
        self.time_ticks = 0;
        self.death = None;
        self.events.clear();
        self.phase = RunPhase::Active;
        self.attempt += 1;
        log::info!("Attempt {} started", self.attempt);
    }

    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }

    pub fn ground_y(&self) -> f32 {
        self.course.ground_y()
    }

    /// A body whose top edge passes this y has fallen out of the world
    pub fn kill_plane_y(&self) -> f32 {
        self.ground_y() + self.tuning.run.kill_plane_tiles * self.course.tile_size()
    }

    /// Distance at which the run completes: course width less the camera
    /// lead. The progress bar fills at the same point.
    pub fn finish_x(&self) -> f32 {
        let run = &self.tuning.run;
        (self.course.total_width() - run.view_width * run.camera_lead).max(1.0)
    }

    /// Progress through the course as 0..=1
    pub fn progress_fraction(&self) -> f32 {
        (self.progress / self.finish_x()).clamp(0.0, 1.0)
    }

    /// Status line for the HUD (empty while running)
    pub fn status_text(&self) -> &'static str {
        match self.phase {
            RunPhase::Active => "",
            RunPhase::Dead => STATUS_DEAD,
            RunPhase::Complete => STATUS_COMPLETE,
        }
    }
}
