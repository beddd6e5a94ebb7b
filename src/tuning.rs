//! Data-driven game balance
//!
//! Every feel constant lives here so hosts can rebalance without a rebuild.
//! Defaults match the hand-tuned level; JSON overrides may supply any subset
//! of fields and the rest keep their defaults.

use serde::{Deserialize, Serialize};

/// Balance table owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration, units/s²
    pub gravity: f32,
    /// Falling speed cap
    pub terminal_velocity: f32,
    /// Horizontal acceleration while a direction is held
    pub run_accel: f32,
    pub max_run_speed: f32,
    /// Damping rate toward zero when no direction is held, per second
    pub friction: f32,
    /// Below this speed the body snaps to a dead stop
    pub stop_threshold: f32,
    /// Upward launch speed of a jump
    pub jump_speed: f32,
    /// How long a jump press is remembered before landing
    pub jump_buffer_window: f32,
    /// Grace period after leaving the ground during which a jump still fires
    pub coyote_window: f32,
    /// Damage immunity granted on respawn
    pub respawn_invuln: f32,
    /// Upward bounce after stomping an enemy
    pub stomp_bounce: f32,
    /// Minimum falling speed for a stomp to count
    pub stomp_fall_threshold: f32,
    /// Maximum bottom-to-top overlap for a stomp; deeper contact hurts
    pub stomp_max_overlap: f32,
    /// How long a squashed enemy lingers before despawning
    pub stomp_squash_time: f32,
    /// Pickup allowance added to each coin's radius
    pub coin_pickup_slack: f32,
    pub coin_score: u32,
    pub brick_score: u32,
    pub stomp_score: u32,
    /// Camera smoothing stiffness, per second
    pub camera_stiffness: f32,
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1500.0,
            terminal_velocity: 1200.0,
            run_accel: 900.0,
            max_run_speed: 220.0,
            friction: 10.0,
            stop_threshold: 4.0,
            jump_speed: 520.0,
            jump_buffer_window: 0.10,
            coyote_window: 0.12,
            respawn_invuln: 0.8,
            stomp_bounce: 420.0,
            stomp_fall_threshold: 80.0,
            stomp_max_overlap: 14.0,
            stomp_squash_time: 0.4,
            coin_pickup_slack: 12.0,
            coin_score: 10,
            brick_score: 20,
            stomp_score: 30,
            camera_stiffness: 6.0,
            starting_lives: 3,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
