//! Browser host facade (wasm32 only)
//!
//! Exposes the session to a JavaScript host: input snapshots in, event JSON
//! and state snapshots out. The host owns the canvas, audio, and DOM; this
//! module never touches them.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::sim::{FixedTimestep, GameState, TickInput};
use crate::tuning::Tuning;

static INIT: Once = Once::new();

fn init_hooks() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// One game session plus its scheduler and current input snapshot
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    scheduler: FixedTimestep,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        init_hooks();
        log::info!("tile-hopper session created");
        WebGame {
            state: GameState::new(),
            scheduler: FixedTimestep::default(),
            input: TickInput::default(),
        }
    }

    /// Construct with a JSON tuning override (missing fields keep defaults)
    pub fn with_tuning(json: &str) -> Result<WebGame, JsValue> {
        init_hooks();
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("tile-hopper session created with custom tuning");
        Ok(WebGame {
            state: GameState::with_tuning(tuning),
            scheduler: FixedTimestep::default(),
            input: TickInput::default(),
        })
    }

    /// Latest input snapshot; consumed once per physics tick
    pub fn set_input(&mut self, left: bool, right: bool, jump: bool) {
        self.input = TickInput { left, right, jump };
    }

    /// Feed one frame's delta (seconds); returns the drained events as JSON
    pub fn advance(&mut self, wall_dt: f32) -> String {
        let events = self.scheduler.advance(&mut self.state, &self.input, wall_dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.state.reset(true);
        self.scheduler.reset();
    }

    // HUD counters

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn coins(&self) -> u32 {
        self.state.coins
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn elapsed(&self) -> f32 {
        self.state.time
    }

    pub fn phase(&self) -> String {
        self.state.phase.as_str().to_string()
    }

    // Render queries

    pub fn camera_x(&self) -> f32 {
        self.state.camera_x
    }

    pub fn visible_start(&self) -> i32 {
        self.state.visible_tile_range().0
    }

    pub fn visible_end(&self) -> i32 {
        self.state.visible_tile_range().1
    }

    pub fn tile_at(&self, tx: i32, ty: i32) -> u8 {
        self.state.level.grid.at(tx, ty).code()
    }

    /// Full session snapshot (entities, grid, counters) as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Just the tile grid as JSON, for hosts that pre-bake the tile layer
    pub fn grid_json(&self) -> String {
        serde_json::to_string(&self.state.level.grid).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
