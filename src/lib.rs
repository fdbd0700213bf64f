//! Carrot Hop - a side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (bodies, collisions, game state)
//! - `level`: Level layout description and validation
//! - `tuning`: Data-driven physics and gameplay constants
//!
//! Windowing, sprites, audio and input devices belong to the host, which calls
//! [`sim::tick`] once per frame and renders from the resulting state.

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::{LevelError, LevelLayout};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Size of one level tile in world units (pixels)
    pub const GRID_SIZE: f32 = 32.0;

    /// Default level extent: 64 tiles wide, 640 px tall
    pub const LEVEL_WIDTH: f32 = 64.0 * GRID_SIZE;
    pub const LEVEL_HEIGHT: f32 = 640.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 1.0;
    /// Maximum downward speed per tick
    pub const TERMINAL_VELOCITY: f32 = 32.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.75;
    pub const PLAYER_JUMP_POWER: f32 = 18.0;
    pub const MAX_HEARTS: i32 = 3;

    /// Ticks of contact immunity after the player is hurt
    pub const DAMAGE_COOLDOWN_TICKS: u32 = 80;
    /// Ticks of invincibility granted by a gold carrot
    pub const INVINCIBLE_TICKS: u32 = 300;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Enemies engage when the player is within this many tiles horizontally
    pub const ENEMY_AGGRO_TILES: f32 = 3.0;
    /// Ticks an enemy stays in its hurt state before it is removed
    pub const ENEMY_HURT_TICKS: u32 = 10;
    /// Player feet above `enemy.top + this` do not take contact damage
    pub const CONTACT_GRACE: f32 = 15.0;
    /// Player feet above `enemy.top + this` while falling count as a stomp
    pub const STOMP_WINDOW: f32 = 50.0;

    /// Flying enemy bob: sink at `FLYING_SINK_SPEED`, rise at
    /// `FLYING_RISE_SPEED` from `FLYING_RISE_AT` until the counter wraps
    pub const FLYING_SINK_SPEED: f32 = 1.0;
    pub const FLYING_RISE_SPEED: f32 = -3.0;
    pub const FLYING_RISE_AT: u32 = 50;
    pub const FLYING_PERIOD: u32 = 100;
}

/// Convert a tile coordinate to world units
#[inline]
pub fn tile_to_world(tile: i32) -> f32 {
    tile as f32 * consts::GRID_SIZE
}
