//! Rectangle-body kinematics and tile collision resolution
//!
//! The tricky part of the platformer: an axis-separated sweep that advances
//! a body one axis at a time and snaps it flush against the first solid tile
//! on its leading edge, so entities never tunnel into or jitter against the
//! grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Tile, TileGrid, world_to_tile};
use crate::consts::TILE;

/// Shrink applied to a body's far edge when mapping it to tile ranges, so a
/// body resting exactly on a tile boundary does not read into the next cell.
const EDGE_EPSILON: f32 = 1e-3;

/// Axis-aligned rectangle body shared by the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// World-space top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Derived each sweep; true when the body landed on a solid tile
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Mid-bottom point (effect anchor for jump dust)
    #[inline]
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y)
    }

    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.overlaps_rect(other.pos, other.size)
    }

    #[inline]
    pub fn overlaps_rect(&self, pos: Vec2, size: Vec2) -> bool {
        self.pos.x < pos.x + size.x
            && self.pos.x + self.size.x > pos.x
            && self.pos.y < pos.y + size.y
            && self.pos.y + self.size.y > pos.y
    }
}

/// What a sweep did to the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Horizontal motion hit a wall and vx was zeroed
    pub blocked_x: bool,
    /// Vertical motion hit a floor or ceiling and vy was zeroed
    pub blocked_y: bool,
    /// Cell of a brick cleared by an upward hit, if any
    pub broken_brick: Option<(i32, i32)>,
}

/// Advance `body` by `dt` and resolve collisions against `grid`.
///
/// X moves first; the tile ranges are then recomputed at the corrected X
/// before Y moves. Scans run from the low tile index up, first hit wins.
/// A downward hit sets `on_ground`; an upward hit on a brick clears the
/// cell and reports it so the caller can score and publish the break.
pub fn resolve_tile_collisions(body: &mut Body, dt: f32, grid: &mut TileGrid) -> SweepResult {
    debug_assert!(dt > 0.0, "dt must be positive");

    let mut result = SweepResult::default();
    let w = body.size.x;
    let h = body.size.y;

    body.on_ground = false;

    // Horizontal pass
    body.pos.x += body.vel.x * dt;
    let top = world_to_tile(body.pos.y);
    let bottom = world_to_tile(body.pos.y + h - EDGE_EPSILON);

    if body.vel.x != 0.0 {
        let moving_right = body.vel.x > 0.0;
        let check_x = if moving_right {
            world_to_tile(body.pos.x + w - EDGE_EPSILON)
        } else {
            world_to_tile(body.pos.x)
        };
        for ty in top..=bottom {
            if grid.at(check_x, ty).is_solid() {
                let tile_x = check_x as f32 * TILE;
                body.pos.x = if moving_right { tile_x - w } else { tile_x + TILE };
                body.vel.x = 0.0;
                result.blocked_x = true;
                break;
            }
        }
    }

    // Vertical pass, ranges recomputed at the corrected X
    body.pos.y += body.vel.y * dt;
    let left = world_to_tile(body.pos.x);
    let right = world_to_tile(body.pos.x + w - EDGE_EPSILON);
    let top = world_to_tile(body.pos.y);
    let bottom = world_to_tile(body.pos.y + h - EDGE_EPSILON);

    if body.vel.y != 0.0 {
        let moving_down = body.vel.y > 0.0;
        let check_y = if moving_down { bottom } else { top };
        for tx in left..=right {
            let tile = grid.at(tx, check_y);
            if tile.is_solid() {
                let tile_y = check_y as f32 * TILE;
                if moving_down {
                    body.pos.y = tile_y - h;
                    body.on_ground = true;
                } else {
                    body.pos.y = tile_y + TILE;
                    if tile == Tile::Brick {
                        grid.set(tx, check_y, Tile::Empty);
                        result.broken_brick = Some((tx, check_y));
                    }
                }
                body.vel.y = 0.0;
                result.blocked_y = true;
                break;
            }
        }
    }

    result
}
