//! Accumulator-based fixed-timestep driver
//!
//! Converts variable wall-clock frame deltas into a whole number of
//! fixed-size simulation steps, carrying the remainder between frames so
//! simulation speed is independent of frame delivery.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_frame_dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            step: SIM_DT,
            max_frame_dt: MAX_FRAME_DT,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }
}

impl FixedTimestep {
    pub fn with_step(step: f32) -> Self {
        assert!(step > 0.0, "step must be positive");
        Self {
            step,
            ..Self::default()
        }
    }

    /// Feed one frame's wall-clock delta; runs zero or more fixed steps and
    /// returns every event they produced.
    ///
    /// The delta is clamped before accumulating so a long stall cannot spiral
    /// into an ever-growing step backlog, with the substep cap as a second
    /// guard. Nothing accumulates while the session is paused or over, so
    /// unpausing never replays a burst of queued steps.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        wall_dt: f32,
    ) -> Vec<GameEvent> {
        debug_assert!(wall_dt >= 0.0, "frame delta must be non-negative");

        let mut events = Vec::new();
        if state.phase != GamePhase::Playing {
            return events;
        }

        self.accumulator += wall_dt.min(self.max_frame_dt);
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            events.extend(tick(state, input, self.step));
            self.accumulator -= self.step;
            substeps += 1;
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        events
    }

    /// Drop any carried remainder (on restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
