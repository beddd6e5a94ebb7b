//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No rendering or platform dependencies
//! - Side effects are reported as [`GameEvent`]s for the host to drain,
//!   never invoked directly

pub mod collision;
pub mod grid;
pub mod level;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Body, SweepResult, resolve_tile_collisions};
pub use grid::{Tile, TileGrid, tile_center, world_to_tile};
pub use level::{Coin, Enemy, Flag, LEVEL_HEIGHT, LEVEL_WIDTH, Level};
pub use scheduler::FixedTimestep;
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
