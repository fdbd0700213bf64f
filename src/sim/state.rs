//! Game state and core simulation types
//!
//! Every entity is a [`Body`] plus a kind tag. Behaviour differences between
//! kinds are expressed as methods on the tag and dispatched with `match`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Direction};
use super::bounds::LevelBounds;
use super::rect::Rect;
use crate::consts::GRID_SIZE;
use crate::level::LevelLayout;
use crate::tuning::Tuning;

/// A static, solid level tile (or run of tiles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Runtime level geometry, fixed once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub platforms: Vec<Platform>,
    pub bounds: LevelBounds,
    /// Player spawn, top-left corner in world units
    pub spawn: Vec2,
}

/// Enemy varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Walks left toward a nearby player
    Basic,
    /// Ignores gravity and bobs up and down, always on the attack
    Flying,
    /// Same AI as `Basic`
    Worm,
}

impl EnemyKind {
    pub fn affected_by_gravity(&self) -> bool {
        match self {
            EnemyKind::Basic | EnemyKind::Worm => true,
            EnemyKind::Flying => false,
        }
    }

    /// Attacks regardless of player distance or its own hurt state
    pub fn always_attacks(&self) -> bool {
        matches!(self, EnemyKind::Flying)
    }
}

/// Power-up varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    /// Restores one heart
    Carrot,
    /// Temporary invincibility
    GoldCarrot,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    FellOutOfWorld,
    OutOfHearts,
}

/// Things that happened during a tick, for the host's sounds and HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    PlayerHurt { hearts: i32 },
    PlayerDied { cause: DeathCause },
    EnemyStomped { id: u32 },
    EnemyHurt { id: u32 },
    EnemyDefeated { id: u32, kind: EnemyKind },
    PowerupCollected { id: u32, kind: PowerupKind },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub hearts: i32,
    /// Ticks left before contact damage can apply again
    pub damaged_ticks: u32,
    /// Ticks of invincibility left
    pub invincible_ticks: u32,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                spawn,
                Vec2::splat(GRID_SIZE),
                tuning.player_speed,
                tuning.player_jump_power,
            ),
            hearts: tuning.max_hearts,
            damaged_ticks: 0,
            invincible_ticks: 0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Count down damage cooldown and invincibility
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.damaged_ticks = self.damaged_ticks.saturating_sub(1);
    }

    /// Add (or with a negative amount, remove) hearts, capped at `max`.
    ///
    /// Returns true when the player has run out: zero hearts is still alive,
    /// going below zero is not.
    pub fn add_hearts(&mut self, amount: i32, max: i32) -> bool {
        self.hearts = (self.hearts + amount).min(max);
        self.hearts < 0
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    /// Hit by the player; removed once `damaged_ticks` runs out
    pub hurt: bool,
    pub damaged_ticks: u32,
    /// Flying bob counter
    pub ticks: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind,
            body: Body::tile(pos, tuning.enemy_speed),
            hurt: false,
            damaged_ticks: 0,
            ticks: 0,
        }
    }

    /// Attack movement for this kind
    pub fn advance(&mut self, tuning: &Tuning) {
        match self.kind {
            EnemyKind::Basic | EnemyKind::Worm => {
                self.body.set_horizontal_intent(Direction::Left);
            }
            EnemyKind::Flying => {
                self.body.vel.y = if self.ticks >= tuning.flying_rise_at {
                    tuning.flying_rise_speed
                } else {
                    tuning.flying_sink_speed
                };
                if self.ticks >= tuning.flying_period {
                    self.ticks = 0;
                }
            }
        }
    }

    /// Hurt and done flashing
    pub fn is_finished(&self) -> bool {
        self.hurt && self.damaged_ticks == 0
    }

    /// Left the level through the left or top edge. Falling into a pit does
    /// not count.
    pub fn is_out_of_world(&self) -> bool {
        self.body.pos.x < 0.0 || self.body.pos.y < 0.0
    }

    pub fn mark_hurt(&mut self, ticks: u32) {
        self.hurt = true;
        self.damaged_ticks = ticks;
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub rect: Rect,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Source layout, used to rebuild entities on respawn
    pub layout: LevelLayout,
    pub level: Level,
    pub tuning: Tuning,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Uncollected power-ups (sorted by id)
    pub powerups: Vec<Powerup>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of player deaths so far
    pub deaths: u32,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a level from its layout
    pub fn new(layout: LevelLayout, tuning: Tuning) -> Self {
        let level = layout.build();
        let player = Player::new(level.spawn, &tuning);
        log::info!(
            "Level '{}' loaded: {} platforms, {} enemies, {} powerups",
            level.name,
            level.platforms.len(),
            layout.enemies.len(),
            layout.powerups.len()
        );

        let mut state = Self {
            layout,
            level,
            tuning,
            player,
            enemies: Vec::new(),
            powerups: Vec::new(),
            time_ticks: 0,
            deaths: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.populate();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// (Re)spawn enemies and power-ups from the layout
    pub fn populate(&mut self) {
        self.enemies.clear();
        self.powerups.clear();

        let layout = self.layout.clone();
        for spawn in &layout.enemies {
            let id = self.next_entity_id();
            self.enemies
                .push(Enemy::new(id, spawn.kind, spawn.pos.to_world(), &self.tuning));
        }
        for spawn in &layout.powerups {
            let id = self.next_entity_id();
            self.powerups.push(Powerup {
                id,
                kind: spawn.kind,
                rect: Rect::from_pos_size(spawn.pos.to_world(), Vec2::splat(GRID_SIZE)),
            });
        }
    }

    /// Send the player back to the level start with full hearts and reset
    /// the level's enemies and power-ups
    pub fn respawn(&mut self) {
        self.deaths += 1;
        self.player.body.respawn(self.level.spawn);
        self.player.hearts = self.tuning.max_hearts;
        self.populate();
        log::info!(
            "Player respawned at ({}, {}) (death #{})",
            self.level.spawn.x,
            self.level.spawn.y,
            self.deaths
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{EnemySpawn, PowerupSpawn, TilePos, TileRect};

    fn layout() -> LevelLayout {
        LevelLayout {
            name: "test".into(),
            width_tiles: 20,
            height: 640.0,
            spawn: TilePos { x: 2, y: 10 },
            platforms: vec![TileRect { x: 0, y: 15, w: 20, h: 1 }],
            enemies: vec![
                EnemySpawn { pos: TilePos { x: 8, y: 14 }, kind: EnemyKind::Basic },
                EnemySpawn { pos: TilePos { x: 12, y: 5 }, kind: EnemyKind::Flying },
            ],
            powerups: vec![PowerupSpawn { pos: TilePos { x: 5, y: 14 }, kind: PowerupKind::Carrot }],
        }
    }

    #[test]
    fn test_new_state_spawns_entities_in_id_order() {
        let state = GameState::new(layout(), Tuning::default());
        assert_eq!(state.player.body.pos, Vec2::new(64.0, 320.0));
        assert_eq!(state.player.hearts, 3);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.powerups.len(), 1);

        let ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.powerups[0].id, 3);
    }

    #[test]
    fn test_hearts_cap_and_death_threshold() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        assert!(!player.add_hearts(5, 3));
        assert_eq!(player.hearts, 3);

        assert!(!player.add_hearts(-3, 3));
        assert_eq!(player.hearts, 0);
        assert!(player.add_hearts(-1, 3));
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.invincible_ticks = 2;
        player.damaged_ticks = 1;

        player.tick_timers();
        assert!(player.is_invincible());
        assert_eq!(player.damaged_ticks, 0);

        player.tick_timers();
        player.tick_timers();
        assert!(!player.is_invincible());
        assert_eq!(player.damaged_ticks, 0);
    }

    #[test]
    fn test_respawn_restores_level() {
        let mut state = GameState::new(layout(), Tuning::default());
        state.player.body.pos = Vec2::new(500.0, 100.0);
        state.player.body.vel = Vec2::new(3.75, 9.0);
        state.player.hearts = 0;
        state.enemies.clear();
        state.powerups.clear();

        state.respawn();
        assert_eq!(state.player.body.pos, state.level.spawn);
        assert_eq!(state.player.body.vel, Vec2::ZERO);
        assert_eq!(state.player.hearts, 3);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.deaths, 1);
        // Fresh ids after a rebuild
        assert_eq!(state.enemies[0].id, 4);
    }

    #[test]
    fn test_flying_bob_cycle() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(1, EnemyKind::Flying, Vec2::ZERO, &tuning);

        enemy.advance(&tuning);
        assert_eq!(enemy.body.vel.y, tuning.flying_sink_speed);

        enemy.ticks = 50;
        enemy.advance(&tuning);
        assert_eq!(enemy.body.vel.y, tuning.flying_rise_speed);

        enemy.ticks = 100;
        enemy.advance(&tuning);
        assert_eq!(enemy.body.vel.y, tuning.flying_rise_speed);
        assert_eq!(enemy.ticks, 0);
        assert_eq!(enemy.body.vel.x, 0.0);
    }

    #[test]
    fn test_walkers_head_left() {
        let tuning = Tuning::default();
        for kind in [EnemyKind::Basic, EnemyKind::Worm] {
            let mut enemy = Enemy::new(1, kind, Vec2::ZERO, &tuning);
            enemy.advance(&tuning);
            assert_eq!(enemy.body.vel.x, -tuning.enemy_speed);
            assert!(kind.affected_by_gravity());
            assert!(!kind.always_attacks());
        }
        assert!(!EnemyKind::Flying.affected_by_gravity());
    }
}
