//! Physics and gameplay tuning
//!
//! Defaults come from [`crate::consts`]. Hosts can override any subset from a
//! JSON document; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Cap on downward speed per tick
    pub terminal_velocity: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_jump_power: f32,
    pub max_hearts: i32,
    /// Contact-damage immunity after being hurt
    pub damage_cooldown_ticks: u32,
    /// Duration of the gold carrot effect
    pub invincible_ticks: u32,

    // === Enemies ===
    pub enemy_speed: f32,
    /// Horizontal engage range, in tiles
    pub enemy_aggro_tiles: f32,
    pub enemy_hurt_ticks: u32,
    pub contact_grace: f32,
    pub stomp_window: f32,
    pub flying_sink_speed: f32,
    pub flying_rise_speed: f32,
    pub flying_rise_at: u32,
    pub flying_period: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,

            player_speed: PLAYER_SPEED,
            player_jump_power: PLAYER_JUMP_POWER,
            max_hearts: MAX_HEARTS,
            damage_cooldown_ticks: DAMAGE_COOLDOWN_TICKS,
            invincible_ticks: INVINCIBLE_TICKS,

            enemy_speed: ENEMY_SPEED,
            enemy_aggro_tiles: ENEMY_AGGRO_TILES,
            enemy_hurt_ticks: ENEMY_HURT_TICKS,
            contact_grace: CONTACT_GRACE,
            stomp_window: STOMP_WINDOW,
            flying_sink_speed: FLYING_SINK_SPEED,
            flying_rise_speed: FLYING_RISE_SPEED,
            flying_rise_at: FLYING_RISE_AT,
            flying_period: FLYING_PERIOD,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning: gravity={} speed={} jump={}",
            tuning.gravity,
            tuning.player_speed,
            tuning.player_jump_power
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Engage range in world units
    pub fn enemy_aggro_range(&self) -> f32 {
        self.enemy_aggro_tiles * GRID_SIZE
    }
}
