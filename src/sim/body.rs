//! Kinematic body: position, velocity and the forces applied to them
//!
//! Velocities are expressed in world units per tick. Horizontal motion uses
//! instant speed (no acceleration or friction): intent overwrites `vel.x`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Platform;
use crate::consts::*;

/// Horizontal movement intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

/// A simulated entity subject to gravity and platform collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the bounding rectangle
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height of the bounding rectangle
    pub size: Vec2,
    /// Horizontal speed used by `set_horizontal_intent`
    pub speed: f32,
    /// Upward impulse applied by a successful jump
    pub jump_power: f32,
    /// Supported by a platform as of the last vertical pass
    pub grounded: bool,
}

impl Body {
    /// A body at rest at `pos`. Not grounded until the first collision pass.
    pub fn new(pos: Vec2, size: Vec2, speed: f32, jump_power: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            speed,
            jump_power,
            grounded: false,
        }
    }

    /// One-tile body with the given speed and no jump
    pub fn tile(pos: Vec2, speed: f32) -> Self {
        Self::new(pos, Vec2::splat(GRID_SIZE), speed, 0.0)
    }

    /// Bounding rectangle, always derived from `pos`
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Increase downward velocity by `gravity`, capped at `terminal`
    pub fn apply_gravity(&mut self, gravity: f32, terminal: f32) {
        self.vel.y = (self.vel.y + gravity).min(terminal);
    }

    /// Overwrite horizontal velocity from intent
    pub fn set_horizontal_intent(&mut self, direction: Direction) {
        self.vel.x = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
            Direction::None => 0.0,
        };
    }

    /// Jump if a platform lies less than 1 unit below the body.
    ///
    /// Probes with the rectangle shifted down by exactly one unit. On success
    /// only `vel.y` changes; `grounded` is settled by the next collision pass.
    pub fn jump(&mut self, platforms: &[Platform]) -> bool {
        let probe = self.rect().translated(Vec2::new(0.0, 1.0));
        let supported = platforms.iter().any(|p| probe.intersects(&p.rect));
        if supported {
            self.vel.y = -self.jump_power;
        }
        supported
    }

    /// Put the body back at `spawn` with no velocity
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Body {
        Body::new(
            Vec2::new(x, y),
            Vec2::splat(GRID_SIZE),
            PLAYER_SPEED,
            PLAYER_JUMP_POWER,
        )
    }

    fn floor_at(y: f32) -> Vec<Platform> {
        vec![Platform::new(Rect::new(0.0, y, 640.0, 32.0))]
    }

    #[test]
    fn test_gravity_accumulates_and_caps() {
        let mut body = player_at(0.0, 0.0);
        body.apply_gravity(GRAVITY, TERMINAL_VELOCITY);
        assert_eq!(body.vel.y, 1.0);

        for _ in 0..100 {
            body.apply_gravity(GRAVITY, TERMINAL_VELOCITY);
        }
        assert_eq!(body.vel.y, TERMINAL_VELOCITY);
        assert_eq!(body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_intent_overwrites() {
        let mut body = player_at(0.0, 0.0);
        body.vel.x = 100.0;

        body.set_horizontal_intent(Direction::Left);
        assert_eq!(body.vel.x, -PLAYER_SPEED);
        body.set_horizontal_intent(Direction::Right);
        assert_eq!(body.vel.x, PLAYER_SPEED);
        body.set_horizontal_intent(Direction::None);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_jump_when_resting() {
        // Bottom edge exactly on the floor at y=500
        let mut body = player_at(100.0, 500.0 - GRID_SIZE);
        assert_eq!(body.rect().bottom(), 500.0);

        assert!(body.jump(&floor_at(500.0)));
        assert_eq!(body.vel.y, -PLAYER_JUMP_POWER);
        // Probe does not move the body
        assert_eq!(body.pos.y, 500.0 - GRID_SIZE);
    }

    #[test]
    fn test_jump_tolerates_sub_unit_gap() {
        let mut body = player_at(100.0, 500.0 - GRID_SIZE - 0.5);
        assert!(body.jump(&floor_at(500.0)));
    }

    #[test]
    fn test_jump_probe_is_exactly_one_unit() {
        // A full unit of air: probe only touches the floor
        let mut body = player_at(100.0, 500.0 - GRID_SIZE - 1.0);
        assert!(!body.jump(&floor_at(500.0)));
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_jump_airborne_is_noop() {
        let mut body = player_at(100.0, 500.0 - GRID_SIZE - 50.0);
        body.vel.y = 4.0;
        assert!(!body.jump(&floor_at(500.0)));
        assert_eq!(body.vel.y, 4.0);
    }

    #[test]
    fn test_respawn_resets_motion() {
        let mut body = player_at(300.0, 200.0);
        body.vel = Vec2::new(3.0, -7.0);
        body.grounded = true;

        body.respawn(Vec2::new(64.0, 96.0));
        assert_eq!(body.pos, Vec2::new(64.0, 96.0));
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(!body.grounded);
    }

    #[test]
    fn test_edge_setters() {
        let mut body = player_at(0.0, 0.0);
        body.set_right(120.0);
        assert_eq!(body.rect().right(), 120.0);
        body.set_bottom(500.0);
        assert_eq!(body.rect().bottom(), 500.0);
        body.set_left(7.0);
        body.set_top(9.0);
        assert_eq!(body.pos, Vec2::new(7.0, 9.0));
    }
}
