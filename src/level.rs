//! Level layout description
//!
//! A layout is the host-facing description of a level on the tile grid:
//! solid platforms, player spawn, enemy and power-up placements. The host
//! decides where layouts come from; this module only checks that a layout is
//! well-formed and turns it into runtime [`Level`] geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, LEVEL_HEIGHT};
use crate::sim::bounds::LevelBounds;
use crate::sim::rect::Rect;
use crate::sim::state::{EnemyKind, Level, Platform, PowerupKind};
use crate::tile_to_world;

/// Errors from loading or validating a layout
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to parse level layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level '{name}' has no platforms")]
    EmptyLevel { name: String },

    #[error("level size {width_tiles} tiles x {height} units is not positive")]
    InvalidBounds { width_tiles: i32, height: f32 },

    #[error("platform #{index} has non-positive size {w}x{h} tiles")]
    DegeneratePlatform { index: usize, w: i32, h: i32 },

    #[error("spawn tile ({x}, {y}) lies outside the level")]
    SpawnOutOfBounds { x: i32, y: i32 },
}

/// A tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    /// Top-left corner of the tile in world units
    pub fn to_world(self) -> Vec2 {
        Vec2::new(tile_to_world(self.x), tile_to_world(self.y))
    }
}

fn one_tile() -> i32 {
    1
}

/// A run of solid tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    #[serde(default = "one_tile")]
    pub w: i32,
    #[serde(default = "one_tile")]
    pub h: i32,
}

impl TileRect {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            tile_to_world(self.x),
            tile_to_world(self.y),
            tile_to_world(self.w),
            tile_to_world(self.h),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(flatten)]
    pub pos: TilePos,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerupSpawn {
    #[serde(flatten)]
    pub pos: TilePos,
    pub kind: PowerupKind,
}

fn default_width_tiles() -> i32 {
    64
}

fn default_height() -> f32 {
    LEVEL_HEIGHT
}

/// Tile-grid description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    #[serde(default = "default_width_tiles")]
    pub width_tiles: i32,
    /// Height of the level in world units; falling past it is fatal
    #[serde(default = "default_height")]
    pub height: f32,
    pub spawn: TilePos,
    pub platforms: Vec<TileRect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub powerups: Vec<PowerupSpawn>,
}

impl LevelLayout {
    /// Parse and validate a JSON layout
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let layout: LevelLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the preconditions the collision code relies on: every platform
    /// has positive size, the level has a positive extent and the player
    /// starts inside it.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width_tiles <= 0 || self.height <= 0.0 {
            return Err(LevelError::InvalidBounds {
                width_tiles: self.width_tiles,
                height: self.height,
            });
        }
        if self.platforms.is_empty() {
            return Err(LevelError::EmptyLevel {
                name: self.name.clone(),
            });
        }
        if let Some((index, p)) = self
            .platforms
            .iter()
            .enumerate()
            .find(|(_, p)| !p.to_rect().is_well_formed())
        {
            return Err(LevelError::DegeneratePlatform {
                index,
                w: p.w,
                h: p.h,
            });
        }

        let spawn = self.spawn.to_world();
        let bounds = self.bounds();
        if spawn.x < 0.0
            || spawn.y < 0.0
            || spawn.x + GRID_SIZE > bounds.width
            || spawn.y + GRID_SIZE > bounds.height
        {
            return Err(LevelError::SpawnOutOfBounds {
                x: self.spawn.x,
                y: self.spawn.y,
            });
        }
        Ok(())
    }

    pub fn bounds(&self) -> LevelBounds {
        LevelBounds::new(tile_to_world(self.width_tiles), self.height)
    }

    /// Runtime geometry for this layout
    pub fn build(&self) -> Level {
        Level {
            name: self.name.clone(),
            platforms: self
                .platforms
                .iter()
                .map(|p| Platform::new(p.to_rect()))
                .collect(),
            bounds: self.bounds(),
            spawn: self.spawn.to_world(),
        }
    }
}
