//! Session state: entities, phase machine, lives/score bookkeeping
//!
//! Everything the host needs for rendering or HUD text is queryable here;
//! everything transient (sounds, particle bursts) comes out as events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::level::Level;
use crate::consts::{TILE, VIEW_W};
use crate::tuning::Tuning;

/// Player body size
const PLAYER_SIZE: Vec2 = Vec2::new(18.0, 22.0);
/// Spawn point in tiles
const SPAWN_TILE: Vec2 = Vec2::new(3.0, 10.0);

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen; reversible
    Paused,
    /// Out of lives; terminal until restart
    Dead,
    /// Reached the flag; terminal until restart
    Won,
}

impl GamePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Dead => "dead",
            GamePhase::Won => "won",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::Won)
    }
}

/// Things that happened during a tick, drained by sound/particle
/// collaborators. Positions are world-space effect spawn points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { pos: Vec2 },
    CoinTaken { pos: Vec2 },
    BrickBroken { pos: Vec2 },
    Stomped { pos: Vec2 },
    Hurt { pos: Vec2 },
    Won,
}

/// The player entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Facing direction, +1 right / -1 left; held while idle
    pub face: i8,
    /// Remembers a jump press shortly before landing
    pub jump_buffer: f32,
    /// Grace period after walking off an edge during which a jump still fires
    pub coyote: f32,
    /// Damage immunity countdown
    pub invuln: f32,
    /// Run-cycle accumulator for renderers
    pub anim: f32,
}

impl Player {
    pub fn spawn(invuln: f32) -> Self {
        Self {
            body: Body::new(SPAWN_TILE * TILE, PLAYER_SIZE),
            face: 1,
            jump_buffer: 0.0,
            coyote: 0.0,
            invuln,
            anim: 0.0,
        }
    }
}

/// Complete session state, owned by the caller and threaded through
/// `tick`/`advance`/query calls. No process-wide singletons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub level: Level,
    pub player: Player,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u32,
    pub coins: u32,
    /// Elapsed simulation time; reset on restart
    pub time: f32,
    /// Horizontal render camera offset, smoothed toward the player
    pub camera_x: f32,
    pub tuning: Tuning,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            level: Level::build(),
            player: Player::spawn(tuning.respawn_invuln),
            phase: GamePhase::Playing,
            lives: tuning.starting_lives,
            score: 0,
            coins: 0,
            time: 0.0,
            camera_x: 0.0,
            tuning,
        }
    }

    /// Rebuild the level and respawn the player; a full reset also restores
    /// lives, score, and coins. Either way the session returns to `Playing`.
    pub fn reset(&mut self, full: bool) {
        self.level = Level::build();
        self.camera_x = 0.0;
        self.time = 0.0;
        if full {
            self.lives = self.tuning.starting_lives;
            self.score = 0;
            self.coins = 0;
        }
        self.phase = GamePhase::Playing;
        self.player = Player::spawn(self.tuning.respawn_invuln);
        log::info!("level reset (full: {full})");
    }

    /// Pause toggle; has no effect once the session is over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            terminal => terminal,
        };
    }

    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (GamePhase::Playing, true) => self.phase = GamePhase::Paused,
            (GamePhase::Paused, false) => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    /// Apply one damage event: lose a life and respawn, or transition to
    /// `Dead` when the last life goes. Contact damage is gated by the
    /// invulnerability window; fall-out damage bypasses it. No-op once the
    /// session is over.
    pub fn damage(&mut self, bypass_invuln: bool, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if !bypass_invuln && self.player.invuln > 0.0 {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::Hurt {
            pos: self.player.body.center(),
        });

        if self.lives == 0 {
            self.phase = GamePhase::Dead;
            log::info!("out of lives, session over (score {})", self.score);
        } else {
            log::debug!("life lost, {} remaining", self.lives);
            self.player = Player::spawn(self.tuning.respawn_invuln);
        }
    }

    /// Flag reached; no-op unless actively playing
    pub fn win(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Won;
        events.push(GameEvent::Won);
        log::info!(
            "level cleared: score {} coins {} in {:.1}s",
            self.score,
            self.coins,
            self.time
        );
    }

    /// Tile columns a renderer should draw for the current camera, with
    /// slack for partially visible columns (2 left, 4 right).
    pub fn visible_tile_range(&self) -> (i32, i32) {
        let start = (self.camera_x / TILE).floor() as i32 - 2;
        let end = start + (VIEW_W / TILE).ceil() as i32 + 4;
        (start, end)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
