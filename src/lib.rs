//! Tile Hopper - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, tile collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `web`: Browser host facade (wasm32 only)
//!
//! The crate owns no rendering, audio, or input devices. Hosts feed input
//! snapshots and frame deltas in, then drain the per-step event list and
//! query state snapshots for drawing.

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{GameEvent, GamePhase, GameState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped before accumulating
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Tile edge length in world units
    pub const TILE: f32 = 24.0;
    /// View size assumed by the camera and the tile-window query
    pub const VIEW_W: f32 = 960.0;
    pub const VIEW_H: f32 = 432.0;
}

/// Linear interpolation from `a` toward `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
