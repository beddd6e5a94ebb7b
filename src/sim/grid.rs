//! Tile grid storage and world/tile coordinate math.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TILE;

/// Tile codes for the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Ground = 1,
    Platform = 2,
    /// Breakable from below; cleared to [`Tile::Empty`] when hit
    Brick = 3,
}

impl Tile {
    /// Whether this tile blocks motion
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, Tile::Empty)
    }

    /// Raw tile code for host-side rendering
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Rectangular tile map. Lookups outside the grid read as empty, so callers
/// never need to bounds-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Tile::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at (tx, ty); anything outside the grid is empty
    #[inline]
    pub fn at(&self, tx: i32, ty: i32) -> Tile {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return Tile::Empty;
        }
        self.cells[ty as usize * self.width + tx as usize]
    }

    /// Write a tile; silently ignores out-of-bounds cells
    pub fn set(&mut self, tx: i32, ty: i32, tile: Tile) {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return;
        }
        self.cells[ty as usize * self.width + tx as usize] = tile;
    }
}

/// World coordinate to tile index (floors toward negative infinity)
#[inline]
pub fn world_to_tile(v: f32) -> i32 {
    (v / TILE).floor() as i32
}

/// World-space center of a tile cell
#[inline]
pub fn tile_center(tx: i32, ty: i32) -> Vec2 {
    Vec2::new((tx as f32 + 0.5) * TILE, (ty as f32 + 0.5) * TILE)
}
