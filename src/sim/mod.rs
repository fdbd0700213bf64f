//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{Body, Direction};
pub use bounds::{BoundaryEvent, LevelBounds, clamp_to_bounds};
pub use collision::{GroundEvent, SweepResult, TickOutcome, resolve_tick, sweep};
pub use rect::Rect;
pub use state::{
    DeathCause, Enemy, EnemyKind, GameEvent, GameState, Level, Platform, Player, Powerup,
    PowerupKind,
};
pub use tick::{TickInput, tick};
