//! Collision classification between the runner and course obstacles
//!
//! There is no swept test. Each overlap is judged in a single frame from the
//! current penetration plus the body's bottom edge at the start of the frame:
//! if that edge was already at (or just below) a block's top, the contact is
//! a landing no matter how the penetration box is shaped. Only when that
//! test fails does the axis comparison decide between a ceiling and a side
//! impact.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::course::{ColumnKind, Obstacle};
use super::geom::Rect;
use crate::tuning::CollisionTuning;

/// How a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a spike
    Hazard,
    /// Vertical impact that was not a landing (head bonk / clipping a top edge from below)
    Ceiling,
    /// Ran into the face of a block
    Side,
    /// Dropped below the kill plane
    FellOut,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Hazard => "hazard",
            DeathCause::Ceiling => "ceiling",
            DeathCause::Side => "side",
            DeathCause::FellOut => "fell out",
        }
    }
}

/// Classification of a single body/obstacle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    None,
    /// Safe landing on a surface whose top edge is at `top`
    Landing { top: f32 },
    Fatal(DeathCause),
}

/// A fatal contact and where it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub cause: DeathCause,
    /// Column of the obstacle, `None` when no obstacle was involved
    pub column: Option<usize>,
}

/// Outcome of resolving one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    /// Top edge to land on, if any candidate was a landing
    pub landing: Option<f32>,
    pub fatal: Option<Impact>,
}

impl Resolution {
    pub fn landed(&self) -> bool {
        self.landing.is_some()
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// The parts of the body state the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Shrunk hitbox at the current position
    pub death_box: Rect,
    /// Bottom edge of the visual box at the start of the frame
    pub prev_bottom: f32,
    pub vel_y: f32,
}

impl Probe {
    pub fn from_body(body: &Body, params: &CollisionTuning) -> Self {
        Self {
            death_box: body.rect().shrunk(params.death_box_shrink),
            prev_bottom: body.prev_bottom(),
            vel_y: body.vel.y,
        }
    }
}

/// Classify one obstacle against the probe
pub fn classify(probe: &Probe, obstacle: &Obstacle, params: &CollisionTuning) -> Contact {
    let depth = probe.death_box.penetration(&obstacle.rect);
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return Contact::None;
    }

    match obstacle.kind {
        ColumnKind::Hazard => return Contact::Fatal(DeathCause::Hazard),
        // Empty columns have no geometry; a stray one never collides
        ColumnKind::Empty => return Contact::None,
        ColumnKind::Solid => {}
    }

    let top = obstacle.rect.top();
    let was_above = probe.prev_bottom <= top + params.landing_tolerance;
    let not_rising = probe.vel_y >= -params.rising_tolerance;
    if was_above && not_rising {
        return Contact::Landing { top };
    }

    if depth.y <= depth.x {
        Contact::Fatal(DeathCause::Ceiling)
    } else {
        Contact::Fatal(DeathCause::Side)
    }
}

/// Resolve every candidate for this frame, in order
///
/// Stops at the first fatal contact. Otherwise the first landing found is
/// reported; later candidates are still checked for fatal contacts.
pub fn resolve_probe(probe: &Probe, obstacles: &[Obstacle], params: &CollisionTuning) -> Resolution {
    let mut resolution = Resolution::default();
    for obstacle in obstacles {
        match classify(probe, obstacle, params) {
            Contact::None => {}
            Contact::Landing { top } => {
                if resolution.landing.is_none() {
                    resolution.landing = Some(top);
                }
            }
            Contact::Fatal(cause) => {
                resolution.fatal = Some(Impact {
                    cause,
                    column: Some(obstacle.column),
                });
                break;
            }
        }
    }
    resolution
}

/// Resolve the body against the candidate obstacles
pub fn resolve(body: &Body, obstacles: &[Obstacle], params: &CollisionTuning) -> Resolution {
    resolve_probe(&Probe::from_body(body, params), obstacles, params)
}
