//! Per-frame run controller
//!
//! Advances one rendered frame: move the body, query obstacles around the
//! view, classify contacts, then apply the landing or the death.

use super::collision::{DeathCause, Impact, Resolution, resolve};
use super::state::{RunEvent, RunPhase, RunState};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Button went down since the last frame (true for exactly one frame per press)
    pub pressed: bool,
    /// Button is currently down
    pub held: bool,
}

/// Frames longer than this are reported when clamped
const STALL_WARN_DT: f32 = 0.25;

/// Advance the run by one frame of `dt` seconds
///
/// Returns the collision verdict for the frame (empty while the run is not
/// active).
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> Resolution {
    state.events.clear();
    let dt = clamp_dt(dt, state.tuning.run.max_frame_dt);

    if state.phase != RunPhase::Active {
        // Gameplay is frozen; let the death burst finish playing
        state.body.update_particles(dt);
        return Resolution::default();
    }

    state.time_ticks += 1;

    let edge_jump = input.pressed && state.body.grounded;
    state.body.advance(dt, input);
    if edge_jump {
        state.events.push(RunEvent::Jumped);
        log::debug!("Jump at x={:.0}", state.body.pos.x);
    }

    let run = state.tuning.run;
    state.view_x = (state.body.pos.x - run.view_width * run.camera_lead).max(0.0);
    state.course.active_colliders_into(
        state.view_x,
        run.view_width,
        run.view_margin_columns,
        &mut state.colliders,
    );
    let mut resolution = resolve(&state.body, &state.colliders, &state.tuning.collision);

    if let Some(impact) = resolution.fatal {
        end_run(state, impact);
    } else if let Some(top) = resolution.landing {
        state.body.land_on(top);
        state.events.push(RunEvent::Landed { top });
        // Holding through a landing chains straight into the next jump
        if input.held {
            state.body.jump();
            state.events.push(RunEvent::Jumped);
            log::debug!("Chained jump at x={:.0}", state.body.pos.x);
        }
    }

    if state.is_active() && state.body.pos.y > state.kill_plane_y() {
        let impact = Impact {
            cause: DeathCause::FellOut,
            column: None,
        };
        resolution.fatal = Some(impact);
        end_run(state, impact);
    }

    state.progress = state.body.pos.x;

    if state.is_active() && state.progress >= state.finish_x() {
        state.phase = RunPhase::Complete;
        state.events.push(RunEvent::Finished);
        log::info!(
            "Attempt {} completed the course in {} ticks",
            state.attempt,
            state.time_ticks
        );
    }

    resolution
}

fn end_run(state: &mut RunState, impact: Impact) {
    state.phase = RunPhase::Dead;
    state.death = Some(impact.cause);
    state.body.kill();
    state.body.emit_death_burst();
    state.events.push(RunEvent::Died(impact.cause));
    log::info!(
        "Attempt {} died ({}) at x={:.0}, column {:?}, after {} ticks",
        state.attempt,
        impact.cause.as_str(),
        state.body.pos.x,
        impact.column,
        state.time_ticks
    );
}

/// Bound the frame step; non-finite or negative steps count as zero
fn clamp_dt(dt: f32, ceiling: f32) -> f32 {
    if !(dt > 0.0) {
        return 0.0;
    }
    if dt > ceiling {
        if dt > STALL_WARN_DT {
            log::warn!("Frame stall of {:.0}ms clamped to {:.0}ms", dt * 1000.0, ceiling * 1000.0);
        }
        return ceiling;
    }
    dt
}
