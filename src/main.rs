//! Neon Runner headless driver
//!
//! Plays attempts with a look-ahead autopilot at a fixed 60 Hz and prints a
//! JSON summary line per attempt.
//!
//! Usage: `neon-runner [tuning.json|-] [seed] [attempts]`

#[cfg(not(target_arch = "wasm32"))]
use neon_runner::sim::{ColumnKind, RunState, tick};
#[cfg(not(target_arch = "wasm32"))]
use neon_runner::{InputLatch, Tuning};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of play per attempt
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Neon Runner (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first().map(String::as_str) {
        Some(path) if path != "-" => match load_tuning(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        _ => Tuning::default(),
    };
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let attempts: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut state = match RunState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut latch = InputLatch::new();

    for n in 0..attempts {
        if n > 0 {
            state.reset();
            latch.clear();
        }
        while state.is_active() && state.time_ticks < MAX_FRAMES {
            if wants_jump(&state) {
                latch.press();
            } else {
                latch.release();
            }
            let input = latch.sample();
            tick(&mut state, &input, FRAME_DT);
        }

        let snapshot = state.snapshot();
        let summary = serde_json::json!({
            "attempt": snapshot.attempt,
            "phase": snapshot.phase,
            "death": snapshot.death,
            "distance": snapshot.distance,
            "progress": snapshot.progress,
            "ticks": state.time_ticks,
        });
        println!("{}", summary);
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The frame loop is driven by the host page on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Tuning::from_json(&json)?)
}

/// Hold the button while the ground just ahead of the body is not a block.
/// Holding keeps chaining jumps on every landing until the way is clear.
#[cfg(not(target_arch = "wasm32"))]
fn wants_jump(state: &RunState) -> bool {
    let tile = state.course.tile_size();
    let front = state.body.pos.x + state.body.width();
    let first = (front / tile).floor().max(0.0) as usize;
    let last = ((front + tile * 0.75) / tile).floor().max(0.0) as usize;
    (first..=last).any(|c| matches!(state.course.column(c), Some(ColumnKind::Empty | ColumnKind::Hazard)))
}
