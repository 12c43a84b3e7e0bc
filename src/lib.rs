//! Neon Runner - a one-button auto-scrolling platformer
//!
//! Core modules:
//! - `sim`: Frame simulation (course, body kinematics, collision classification, run lifecycle)
//! - `input`: Press/hold latch sampled once per frame
//! - `tuning`: Data-driven gameplay constants

pub mod input;
pub mod sim;
pub mod tuning;

pub use input::InputLatch;
pub use tuning::{Tuning, TuningError};

/// Default gameplay constants
pub mod consts {
    use std::f32::consts::FRAC_PI_2;

    /// Width (and block height) of one course column in pixels
    pub const TILE_SIZE: f32 = 64.0;

    /// Course layout
    pub const COLUMN_COUNT: usize = 160;
    pub const SAFE_START_COLUMNS: usize = 6;
    pub const GAP_CHANCE: f64 = 0.25;
    pub const GAP_MIN: usize = 1;
    pub const GAP_MAX: usize = 3;
    pub const PLATFORM_MIN: usize = 1;
    pub const PLATFORM_MAX: usize = 4;
    pub const HAZARD_CHANCE: f64 = 0.08;

    /// Hazard footprint, as fractions of a tile
    pub const HAZARD_INSET: f32 = 0.15;
    pub const HAZARD_WIDTH: f32 = 0.7;
    pub const HAZARD_HEIGHT: f32 = 0.45;

    /// Visible window and baseline
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 720.0;
    /// Ground baseline as a fraction of view height
    pub const GROUND_RATIO: f32 = 0.82;
    /// Body is kept at this fraction of the view width from the left edge
    pub const CAMERA_LEAD: f32 = 0.25;
    /// Extra columns queried on each side of the view
    pub const VIEW_MARGIN_COLUMNS: usize = 2;
    /// Kill plane depth below the ground baseline, in tiles
    pub const KILL_PLANE_TILES: f32 = 2.0;

    /// Body kinematics
    pub const BODY_SIZE_RATIO: f32 = 0.9;
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 200.0;
    pub const RUN_SPEED: f32 = 300.0;
    pub const GRAVITY: f32 = 1800.0;
    pub const LAUNCH_SPEED: f32 = -700.0;
    /// Airborne spin rate (radians/sec)
    pub const SPIN_RATE: f32 = FRAC_PI_2;
    /// Landing snaps rotation to multiples of this angle
    pub const SNAP_ANGLE: f32 = FRAC_PI_2;

    /// Collision classification
    pub const DEATH_BOX_SHRINK: f32 = 0.2;
    pub const LANDING_TOLERANCE: f32 = 8.0;
    pub const RISING_TOLERANCE: f32 = 50.0;

    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.03;

    /// Cosmetic particles
    pub const TRAIL_LIFETIME: f32 = 0.33;
    pub const TRAIL_MAX: usize = 30;
    pub const BURST_COUNT: usize = 20;
    pub const BURST_LIFETIME: f32 = 1.0;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Round angle to the nearest multiple of `step`, normalized to (-π, π]
#[inline]
pub fn snap_angle(angle: f32, step: f32) -> f32 {
    normalize_angle((angle / step).round() * step)
}
