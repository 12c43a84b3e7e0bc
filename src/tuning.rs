//! Gameplay tuning
//!
//! Every constant the simulation reads, grouped by the component that owns
//! it. Loaded from JSON; missing fields fall back to `crate::consts`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Course generation and obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseTuning {
    pub tile_size: f32,
    pub column_count: usize,
    /// Leading columns forced to solid ground
    pub safe_start_columns: usize,
    pub gap_chance: f64,
    pub gap_min: usize,
    pub gap_max: usize,
    pub platform_min: usize,
    pub platform_max: usize,
    /// Per-column hazard chance inside a platform run
    pub hazard_chance: f64,
    /// Hazard footprint as fractions of a tile
    pub hazard_inset: f32,
    pub hazard_width: f32,
    pub hazard_height: f32,
}

impl Default for CourseTuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            column_count: COLUMN_COUNT,
            safe_start_columns: SAFE_START_COLUMNS,
            gap_chance: GAP_CHANCE,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            platform_min: PLATFORM_MIN,
            platform_max: PLATFORM_MAX,
            hazard_chance: HAZARD_CHANCE,
            hazard_inset: HAZARD_INSET,
            hazard_width: HAZARD_WIDTH,
            hazard_height: HAZARD_HEIGHT,
        }
    }
}

impl CourseTuning {
    /// Reject layouts the generator cannot roll
    pub fn validate(&self) -> Result<(), TuningError> {
        check(self.tile_size > 0.0, "course.tile_size", "must be positive")?;
        check(self.column_count > 0, "course.column_count", "must be at least 1")?;
        check(
            self.safe_start_columns <= self.column_count,
            "course.safe_start_columns",
            "must not exceed column_count",
        )?;
        check(is_chance(self.gap_chance), "course.gap_chance", "must be within 0..=1")?;
        check(self.gap_min <= self.gap_max, "course.gap_min", "must not exceed gap_max")?;
        check(self.platform_min >= 1, "course.platform_min", "must be at least 1")?;
        check(
            self.platform_min <= self.platform_max,
            "course.platform_min",
            "must not exceed platform_max",
        )?;
        check(is_chance(self.hazard_chance), "course.hazard_chance", "must be within 0..=1")?;
        check(
            self.hazard_width > 0.0 && self.hazard_inset + self.hazard_width <= 1.0,
            "course.hazard_width",
            "hazard must fit inside its tile",
        )?;
        check(
            self.hazard_height > 0.0 && self.hazard_height <= 1.0,
            "course.hazard_height",
            "must be within (0, 1]",
        )?;
        Ok(())
    }
}

/// Body kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Side length of the (square) body
    pub size: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub run_speed: f32,
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub launch_speed: f32,
    pub spin_rate: f32,
    pub snap_angle: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            size: TILE_SIZE * BODY_SIZE_RATIO,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            run_speed: RUN_SPEED,
            gravity: GRAVITY,
            launch_speed: LAUNCH_SPEED,
            spin_rate: SPIN_RATE,
            snap_angle: SNAP_ANGLE,
        }
    }
}

/// Collision classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Fraction of each body dimension trimmed off the death box
    pub death_box_shrink: f32,
    /// How far below a block top the previous bottom edge may sit and still land
    pub landing_tolerance: f32,
    /// Upward speed still treated as "not rising" when landing
    pub rising_tolerance: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            death_box_shrink: DEATH_BOX_SHRINK,
            landing_tolerance: LANDING_TOLERANCE,
            rising_tolerance: RISING_TOLERANCE,
        }
    }
}

/// Frame loop and view window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    pub view_width: f32,
    pub view_height: f32,
    pub ground_ratio: f32,
    pub camera_lead: f32,
    pub view_margin_columns: usize,
    pub kill_plane_tiles: f32,
    pub max_frame_dt: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            ground_ratio: GROUND_RATIO,
            camera_lead: CAMERA_LEAD,
            view_margin_columns: VIEW_MARGIN_COLUMNS,
            kill_plane_tiles: KILL_PLANE_TILES,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl RunTuning {
    /// Ground baseline y for this view
    pub fn ground_y(&self) -> f32 {
        self.view_height * self.ground_ratio
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub course: CourseTuning,
    pub body: BodyTuning,
    pub collision: CollisionTuning,
    pub run: RunTuning,
}

/// Why a tuning set was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "tuning JSON could not be parsed: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

fn is_chance(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        self.course.validate()?;
        let c = &self.course;
        let b = &self.body;
        check(b.size > 0.0, "body.size", "must be positive")?;
        check(b.run_speed > 0.0, "body.run_speed", "must be positive")?;
        check(b.gravity > 0.0, "body.gravity", "must be positive")?;
        check(b.launch_speed < 0.0, "body.launch_speed", "must point upward (negative)")?;
        check(b.snap_angle > 0.0, "body.snap_angle", "must be positive")?;

        let k = &self.collision;
        check(
            (0.0..1.0).contains(&k.death_box_shrink),
            "collision.death_box_shrink",
            "must be within 0..1",
        )?;
        check(k.landing_tolerance >= 0.0, "collision.landing_tolerance", "must not be negative")?;
        check(k.rising_tolerance >= 0.0, "collision.rising_tolerance", "must not be negative")?;

        let r = &self.run;
        check(r.view_width > 0.0, "run.view_width", "must be positive")?;
        check(r.view_height > 0.0, "run.view_height", "must be positive")?;
        check(r.max_frame_dt > 0.0, "run.max_frame_dt", "must be positive")?;
        check(
            self.max_step_distance() <= c.tile_size * r.view_margin_columns as f32,
            "run.max_frame_dt",
            "one frame of travel must stay inside the collider margin",
        )?;
        Ok(())
    }

    /// Horizontal distance covered in the longest allowed frame
    pub fn max_step_distance(&self) -> f32 {
        self.body.run_speed * self.run.max_frame_dt
    }
}
