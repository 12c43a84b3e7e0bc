//! Render snapshot
//!
//! Copies out everything a presenter needs for one frame so it never has to
//! hold a borrow of the live run.

use serde::Serialize;

use super::collision::DeathCause;
use super::course::Obstacle;
use super::particle::Particle;
use super::state::{RunPhase, RunState};

/// Body pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPose {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub alive: bool,
}

/// One frame's worth of presentation data
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub body: BodyPose,
    pub view_x: f32,
    pub view_width: f32,
    pub ground_y: f32,
    /// Obstacles overlapping the view, in column order
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub distance: f32,
    /// Progress bar fill, 0..=1
    pub progress: f32,
    pub phase: RunPhase,
    pub status: &'static str,
    pub death: Option<DeathCause>,
    pub attempt: u32,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl RunState {
    /// Capture the current frame for presentation
    pub fn snapshot(&self) -> Snapshot {
        let run = &self.tuning.run;
        let obstacles = self
            .course
            .colliders_with_margin(self.view_x, run.view_width, 0)
            .collect();

        Snapshot {
            body: BodyPose {
                x: self.body.pos.x,
                y: self.body.pos.y,
                width: self.body.width(),
                height: self.body.height(),
                angle: self.body.angle,
                alive: self.phase != RunPhase::Dead,
            },
            view_x: self.view_x,
            view_width: run.view_width,
            ground_y: self.ground_y(),
            obstacles,
            particles: self.body.particles.iter().cloned().collect(),
            distance: self.progress,
            progress: self.progress_fraction(),
            phase: self.phase,
            status: self.status_text(),
            death: self.death,
            attempt: self.attempt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::course::ColumnKind;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_of_fresh_run() {
        let state = RunState::new(4);
        let snap = state.snapshot();
        assert_eq!(snap.body.x, 100.0);
        assert!(snap.body.alive);
        assert_eq!(snap.view_x, 0.0);
        assert_eq!(snap.status, "");
        assert_eq!(snap.progress, 0.0);
        // safe start is always in view
        assert!(snap.obstacles.len() >= 6);
        assert!(snap.obstacles.windows(2).all(|w| w[0].column < w[1].column));
        assert!(snap.obstacles.iter().all(|o| o.kind != ColumnKind::Empty));
    }

    #[test]
    fn test_snapshot_after_death() {
        let mut state = RunState::new(4);
        state.course = crate::sim::course::Course::from_columns(
            state.tuning.course,
            state.ground_y(),
            vec![ColumnKind::Empty; 20],
        );
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        let snap = state.snapshot();
        assert!(!snap.body.alive);
        assert_eq!(snap.phase, RunPhase::Dead);
        assert_eq!(snap.death, Some(DeathCause::FellOut));
        assert_eq!(snap.status, "You died - click or tap to restart");
        assert!(snap.obstacles.is_empty());
    }

    #[test]
    fn test_snapshot_json() {
        let mut state = RunState::new(8);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Active");
        assert_eq!(value["attempt"], 1);
        assert!(value["particles"].as_array().unwrap().len() > 0);
        assert!(value["obstacles"][0]["rect"]["pos"].is_array());
    }
}
