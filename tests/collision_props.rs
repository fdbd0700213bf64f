//! Property tests for the collision resolver.
//!
//! Coordinates and velocities are drawn from whole (or quarter) units so the
//! snapping arithmetic is exact and equality assertions are meaningful.

use carrot_hop::consts::{GRID_SIZE, PLAYER_JUMP_POWER, PLAYER_SPEED};
use carrot_hop::sim::collision::{penetration, resolve_horizontal};
use carrot_hop::sim::{
    Body, BoundaryEvent, LevelBounds, Platform, Rect, clamp_to_bounds, resolve_tick, sweep,
};
use glam::Vec2;
use proptest::prelude::*;

fn body_at(x: f32, y: f32) -> Body {
    Body::new(
        Vec2::new(x, y),
        Vec2::splat(GRID_SIZE),
        PLAYER_SPEED,
        PLAYER_JUMP_POWER,
    )
}

fn open_bounds() -> LevelBounds {
    LevelBounds::new(100_000.0, 100_000.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn approach_from_left_ends_flush(
        wall_left in 100i32..1000,
        gap in 0i32..5,
        extra in 1i32..30,
        y in 0i32..500,
    ) {
        let wall = [Platform::new(Rect::new(wall_left as f32, y as f32, 64.0, 64.0))];
        let mut body = body_at((wall_left - gap) as f32 - GRID_SIZE, y as f32);
        body.vel.x = (gap + extra) as f32;

        prop_assert!(resolve_horizontal(&mut body, &wall));
        prop_assert_eq!(body.rect().right(), wall_left as f32);
        prop_assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn landing_ends_on_top_and_grounded(
        floor_top in 100i32..1000,
        gap in 0i32..30,
        extra in 0i32..3,
        x in 0i32..500,
    ) {
        let floor = [Platform::new(Rect::new(0.0, floor_top as f32, 1000.0, 64.0))];
        let mut body = body_at(x as f32, (floor_top - gap) as f32 - GRID_SIZE);
        // vel.y + 1 overshoots the gap, without passing through the floor
        body.vel.y = (gap + extra) as f32;

        let swept = sweep(&mut body, &floor);
        prop_assert!(swept.grounded);
        prop_assert_eq!(body.rect().bottom(), floor_top as f32);
        prop_assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn resting_body_is_a_fixed_point(x in 0i32..900, floor_top in 64i32..1000) {
        let floor = [Platform::new(Rect::new(0.0, floor_top as f32, 1000.0, 32.0))];
        let mut body = body_at(x as f32, floor_top as f32 - GRID_SIZE);

        let first = resolve_tick(&mut body, &floor, &open_bounds());
        let after_first = body.clone();
        let second = resolve_tick(&mut body, &floor, &open_bounds());

        prop_assert!(first.grounded && second.grounded);
        prop_assert_eq!(&after_first, &body);
        prop_assert_eq!(body.pos, Vec2::new(x as f32, floor_top as f32 - GRID_SIZE));
    }

    #[test]
    fn sweep_never_leaves_body_inside_platform(
        px in 200i32..400, py in 200i32..400,
        pw in 32i32..128, ph in 32i32..128,
        bx in 0i32..600, by in 0i32..600,
        vx in -31i32..32, vy in -31i32..31,
    ) {
        let platform = Platform::new(Rect::new(px as f32, py as f32, pw as f32, ph as f32));
        let mut body = body_at(bx as f32, by as f32);
        prop_assume!(!body.rect().intersects(&platform.rect));
        body.vel = Vec2::new(vx as f32, vy as f32);

        sweep(&mut body, &[platform]);
        prop_assert_eq!(penetration(&body, &platform), Vec2::ZERO);
    }

    #[test]
    fn jump_probe_is_one_unit(quarters in 0i32..12, x in 0i32..500) {
        let gap = quarters as f32 * 0.25;
        let floor = [Platform::new(Rect::new(0.0, 500.0, 1000.0, 32.0))];
        let mut body = body_at(x as f32, 500.0 - GRID_SIZE - gap);

        let jumped = body.jump(&floor);
        prop_assert_eq!(jumped, gap < 1.0);
        if jumped {
            prop_assert_eq!(body.vel.y, -PLAYER_JUMP_POWER);
        } else {
            prop_assert_eq!(body.vel.y, 0.0);
        }
    }

    #[test]
    fn falling_below_floor_line_signals_once(overshoot in 1i32..5000) {
        let bounds = LevelBounds::new(640.0, 480.0);
        let mut body = body_at(100.0, 480.0 - GRID_SIZE + overshoot as f32);
        let before = body.pos;

        prop_assert_eq!(clamp_to_bounds(&mut body, &bounds), Some(BoundaryEvent::FellOutOfWorld));
        prop_assert_eq!(body.pos, before);
    }
}
