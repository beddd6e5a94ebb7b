//! Hand-authored level: tile layout, coins, enemies, and the goal flag
//!
//! Building is deterministic: two calls to [`Level::build`] produce identical
//! levels, which is what makes restart a true reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::grid::{Tile, TileGrid, tile_center};
use crate::consts::TILE;

/// Level dimensions in tiles
pub const LEVEL_WIDTH: usize = 160;
pub const LEVEL_HEIGHT: usize = 18;

/// Enemy body size
const ENEMY_SIZE: Vec2 = Vec2::new(20.0, 20.0);

/// A collectible coin; `taken` flips once and never reverts within a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

/// A patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    /// Signed patrol speed; the sign flips when a wall stops the body
    pub patrol_vx: f32,
    pub alive: bool,
    /// Squash countdown after a stomp; the enemy despawns when it expires
    pub stomped_timer: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, patrol_vx: f32) -> Self {
        Self {
            body: Body::new(pos, ENEMY_SIZE),
            patrol_vx,
            alive: true,
            stomped_timer: 0.0,
        }
    }

    /// Stomped enemies linger while squashed, then disappear
    pub fn visible(&self) -> bool {
        self.alive || self.stomped_timer > 0.0
    }
}

/// The goal flag; purely a collision zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Base of the pole, on the ground
    pub base: Vec2,
    pub pole_height: f32,
}

impl Flag {
    /// Collision zone around the pole: a thin strip the full pole height
    pub fn pole_zone(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.base.x - 6.0, self.base.y - self.pole_height),
            Vec2::new(12.0, self.pole_height),
        )
    }
}

/// One level's static grid plus its dynamic entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub grid: TileGrid,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub flag: Flag,
}

impl Level {
    pub fn build() -> Self {
        let width = LEVEL_WIDTH as i32;
        let height = LEVEL_HEIGHT as i32;
        let mut grid = TileGrid::new(LEVEL_WIDTH, LEVEL_HEIGHT);

        // Ground: bottom two rows, with a few gaps to fall through
        for tx in 0..width {
            grid.set(tx, height - 2, Tile::Ground);
            grid.set(tx, height - 1, Tile::Ground);
        }
        for &tx in &[18, 19, 48, 49, 50, 78, 79, 120, 121] {
            grid.set(tx, height - 2, Tile::Empty);
            grid.set(tx, height - 1, Tile::Empty);
        }

        // Floating platform runs: (x, y, w)
        for &(x, y, w) in &[
            (10, 12, 6),
            (24, 10, 5),
            (34, 8, 4),
            (44, 12, 7),
            (58, 9, 6),
            (70, 7, 5),
            (90, 11, 7),
            (106, 9, 6),
            (130, 10, 8),
        ] {
            for dx in 0..w {
                grid.set(x + dx, y, Tile::Platform);
            }
        }

        // Breakable bricks
        for &(x, y) in &[
            (14, 9),
            (15, 9),
            (16, 9),
            (35, 5),
            (36, 5),
            (37, 5),
            (60, 6),
            (61, 6),
            (92, 8),
            (93, 8),
            (94, 8),
        ] {
            grid.set(x, y, Tile::Brick);
        }

        // Coin rows: every second column of each run, (x0..x1, row)
        let mut coins = Vec::new();
        for &(x0, x1, ty) in &[
            (12, 20, 11),
            (26, 34, 9),
            (46, 54, 11),
            (60, 68, 8),
            (72, 78, 6),
            (92, 100, 10),
            (108, 116, 8),
            (132, 140, 9),
        ] {
            for tx in (x0..x1).step_by(2) {
                coins.push(Coin {
                    pos: tile_center(tx, ty),
                    radius: 7.0,
                    taken: false,
                });
            }
        }

        let floor_y = (height - 3) as f32 * TILE;
        let enemies = vec![
            Enemy::new(Vec2::new(34.0 * TILE, floor_y), 55.0),
            Enemy::new(Vec2::new(64.0 * TILE, floor_y), -55.0),
            Enemy::new(Vec2::new(96.0 * TILE, floor_y), 65.0),
            Enemy::new(Vec2::new(122.0 * TILE, floor_y), -65.0),
        ];

        let flag = Flag {
            base: Vec2::new((width - 8) as f32 * TILE, (height - 2) as f32 * TILE),
            pole_height: 10.0 * TILE,
        };

        Self {
            grid,
            coins,
            enemies,
            flag,
        }
    }
}
