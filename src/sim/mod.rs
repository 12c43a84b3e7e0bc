//! Frame simulation
//!
//! All gameplay logic lives here. Nothing in this module renders, reads a
//! device or looks at the clock:
//! - Frame dt is supplied by the caller and clamped
//! - Seeded RNG only, with cosmetics on their own stream
//! - Obstacles are visited in column order

pub mod body;
pub mod collision;
pub mod course;
pub mod geom;
pub mod particle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{Contact, DeathCause, Impact, Probe, Resolution, classify, resolve};
pub use course::{ColumnKind, Course, Obstacle};
pub use geom::Rect;
pub use particle::{Particle, ParticleField, ParticleKind};
pub use snapshot::{BodyPose, Snapshot};
pub use state::{RunEvent, RunPhase, RunState, STATUS_COMPLETE, STATUS_DEAD};
pub use tick::{TickInput, tick};
