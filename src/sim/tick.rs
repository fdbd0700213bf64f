//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one frame at
//! the fixed tick rate.

use super::body::Direction;
use super::bounds::BoundaryEvent;
use super::collision::{GroundEvent, resolve_tick, sweep};
use super::state::{DeathCause, GameEvent, GameState, PowerupKind};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump pressed this frame (edge, not level)
    pub jump: bool,
}

impl TickInput {
    /// Horizontal intent from held keys; opposing keys cancel out
    pub fn direction(&self) -> Direction {
        match (self.left, self.right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// Events produced during the tick replace the previous contents of
/// `state.events`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    // Input
    state.player.body.set_horizontal_intent(input.direction());
    if input.jump && state.player.body.jump(&state.level.platforms) {
        state.events.push(GameEvent::Jumped);
    }

    if let Some(cause) = update_player(state) {
        die(state, cause);
        return;
    }

    if let Some(cause) = update_enemies(state) {
        die(state, cause);
        return;
    }

    collect_powerups(state);
}

fn die(state: &mut GameState, cause: DeathCause) {
    log::info!("Player died at tick {}: {:?}", state.time_ticks, cause);
    state.events.push(GameEvent::PlayerDied { cause });
    state.respawn();
}

/// Timers, gravity, platform collision, world bounds
fn update_player(state: &mut GameState) -> Option<DeathCause> {
    let GameState {
        level,
        tuning,
        player,
        events,
        ..
    } = state;

    player.tick_timers();
    player
        .body
        .apply_gravity(tuning.gravity, tuning.terminal_velocity);

    let outcome = resolve_tick(&mut player.body, &level.platforms, &level.bounds);
    if outcome.ground_event == Some(GroundEvent::Landed) {
        events.push(GameEvent::Landed);
    }

    match outcome.boundary {
        Some(BoundaryEvent::FellOutOfWorld) => Some(DeathCause::FellOutOfWorld),
        None => None,
    }
}

/// Run every enemy in id order. Stops early if an enemy kills the player,
/// since the respawn rebuilds the enemy list.
fn update_enemies(state: &mut GameState) -> Option<DeathCause> {
    let GameState {
        level,
        tuning,
        player,
        enemies,
        events,
        ..
    } = state;

    let aggro_range = tuning.enemy_aggro_range();
    let mut removed: Vec<u32> = Vec::new();

    for enemy in enemies.iter_mut() {
        enemy.damaged_ticks = enemy.damaged_ticks.saturating_sub(1);
        if enemy.is_finished() {
            log::debug!("Enemy {} ({:?}) defeated", enemy.id, enemy.kind);
            events.push(GameEvent::EnemyDefeated {
                id: enemy.id,
                kind: enemy.kind,
            });
            removed.push(enemy.id);
            continue;
        }

        if enemy.kind.affected_by_gravity() {
            enemy
                .body
                .apply_gravity(tuning.gravity, tuning.terminal_velocity);
        }

        // AI: close in and try to hurt the player, or hold still
        let player_x = player.body.pos.x;
        let enemy_x = enemy.body.pos.x;
        let in_range = enemy_x + aggro_range > player_x && player_x > enemy_x - aggro_range;
        if enemy.kind.always_attacks() || (in_range && !enemy.hurt) {
            enemy.advance(tuning);

            let enemy_rect = enemy.body.rect();
            let player_rect = player.body.rect();
            let touching = enemy_rect.intersects(&player_rect);
            let feet_above = player_rect.bottom() <= enemy_rect.top() + tuning.contact_grace;
            if touching && !player.is_invincible() && player.damaged_ticks == 0 && !feet_above {
                let out_of_hearts = player.add_hearts(-1, tuning.max_hearts);
                player.damaged_ticks = tuning.damage_cooldown_ticks;
                events.push(GameEvent::PlayerHurt {
                    hearts: player.hearts,
                });
                log::debug!("Enemy {} hurt player, hearts={}", enemy.id, player.hearts);
                if out_of_hearts {
                    return Some(DeathCause::OutOfHearts);
                }
            }
        } else {
            enemy.body.set_horizontal_intent(Direction::None);
        }

        sweep(&mut enemy.body, &level.platforms);

        if enemy.is_out_of_world() {
            log::debug!("Enemy {} left the world", enemy.id);
            removed.push(enemy.id);
            continue;
        }

        // Stomp check, or contact with an invincible player
        let enemy_rect = enemy.body.rect();
        let player_rect = player.body.rect();
        if enemy_rect.intersects(&player_rect) {
            let stomping = player_rect.bottom() <= enemy_rect.top() + tuning.stomp_window
                && player.body.vel.y > 0.0;
            if stomping {
                enemy.mark_hurt(tuning.enemy_hurt_ticks);
                player.body.vel.y = -player.body.jump_power;
                events.push(GameEvent::EnemyStomped { id: enemy.id });
                log::debug!("Enemy {} stomped", enemy.id);
            } else if player.is_invincible() {
                // Re-armed on every overlapping tick; the countdown only
                // runs out once contact ends
                if !enemy.hurt {
                    events.push(GameEvent::EnemyHurt { id: enemy.id });
                }
                enemy.mark_hurt(tuning.enemy_hurt_ticks);
            }
        }

        if enemy.kind.always_attacks() {
            enemy.ticks += 1;
        }
    }

    enemies.retain(|e| !removed.contains(&e.id));
    None
}

/// Consume every power-up the player is touching
fn collect_powerups(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        powerups,
        events,
        ..
    } = state;

    let player_rect = player.body.rect();
    powerups.retain(|powerup| {
        if !powerup.rect.intersects(&player_rect) {
            return true;
        }
        match powerup.kind {
            PowerupKind::Carrot => {
                player.add_hearts(1, tuning.max_hearts);
            }
            PowerupKind::GoldCarrot => {
                player.invincible_ticks = tuning.invincible_ticks;
            }
        }
        log::debug!("Collected {:?} (id {})", powerup.kind, powerup.id);
        events.push(GameEvent::PowerupCollected {
            id: powerup.id,
            kind: powerup.kind,
        });
        false
    });
}
