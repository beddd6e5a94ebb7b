//! Tile Hopper headless demo
//!
//! Drives the simulation with a scripted input sequence and synthetic frame
//! deltas, logging the events each frame produces. Useful as a smoke run and
//! as a reference for how hosts should wire the scheduler.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tile_hopper::sim::{FixedTimestep, GamePhase, GameState, TickInput};

    env_logger::init();
    log::info!("tile-hopper (native) starting...");

    let mut state = GameState::new();
    let mut scheduler = FixedTimestep::default();
    let frame_dt = 1.0 / 60.0;

    // Hold right and tap jump on a cycle; enough to clear the early gaps
    let mut frames = 0u32;
    while state.phase == GamePhase::Playing && frames < 60 * 120 {
        let t = state.time;
        let input = TickInput {
            right: true,
            jump: t % 1.4 < 0.25,
            ..TickInput::default()
        };

        for event in scheduler.advance(&mut state, &input, frame_dt) {
            log::info!("event: {event:?}");
        }
        frames += 1;
    }

    log::info!(
        "demo finished: phase {:?}, score {}, coins {}, lives {}, {:.1}s simulated",
        state.phase,
        state.score,
        state.coins,
        state.lives,
        state.time
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm32 surface is the `web::WebGame` facade in the cdylib
}
