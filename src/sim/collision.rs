//! Collision resolution against static platforms
//!
//! Bodies move one axis at a time: horizontal move and resolve, then vertical
//! move and resolve. Resolving X first makes a diagonal approach to a platform
//! corner slide along the surface instead of stopping dead.
//!
//! When several platforms overlap on the same pass, each one snaps the body in
//! iteration order, so the last intersecting platform wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bounds::{BoundaryEvent, LevelBounds, clamp_to_bounds};
use super::state::Platform;

/// Extra downward displacement applied on every vertical pass, so a body
/// resting exactly on a surface still overlaps it and stays grounded
pub const VERTICAL_BIAS: f32 = 1.0;

/// Change in grounded state across one vertical pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundEvent {
    /// Was airborne, now supported
    Landed,
    /// Was supported, now airborne
    LeftGround,
}

impl GroundEvent {
    fn from_transition(was_grounded: bool, grounded: bool) -> Option<Self> {
        match (was_grounded, grounded) {
            (false, true) => Some(GroundEvent::Landed),
            (true, false) => Some(GroundEvent::LeftGround),
            _ => None,
        }
    }
}

/// Result of moving a body through the platform set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepResult {
    /// Body ended the pass supported by a platform
    pub grounded: bool,
    pub ground_event: Option<GroundEvent>,
    /// Upward motion was stopped by a platform underside
    pub hit_ceiling: bool,
}

/// Result of a full per-tick resolve (sweep + world bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub grounded: bool,
    pub ground_event: Option<GroundEvent>,
    pub boundary: Option<BoundaryEvent>,
}

/// Move on X and push the body out of any platform it entered.
///
/// Returns true if a platform stopped the motion.
pub fn resolve_horizontal(body: &mut Body, platforms: &[Platform]) -> bool {
    // Direction is fixed before the loop so every intersecting platform gets
    // its turn even after the first one zeroes the velocity
    let vx = body.vel.x;
    body.pos.x += vx;

    let mut blocked = false;
    for platform in platforms {
        // Rect is re-derived per platform since an earlier snap moved the body
        if !body.rect().intersects(&platform.rect) {
            continue;
        }
        if vx > 0.0 {
            body.set_right(platform.rect.left());
            body.vel.x = 0.0;
            blocked = true;
        } else if vx < 0.0 {
            body.set_left(platform.rect.right());
            body.vel.x = 0.0;
            blocked = true;
        }
    }
    blocked
}

/// Move on Y (plus [`VERTICAL_BIAS`]) and push the body out of any platform
/// it entered, recomputing `grounded` from scratch.
///
/// Landing vs. ceiling is decided by the direction of the displacement
/// actually applied (`vel.y + VERTICAL_BIAS`), so a body at rest on a surface
/// lands on it every tick.
///
/// Returns true if a platform underside stopped upward motion.
pub fn resolve_vertical(body: &mut Body, platforms: &[Platform]) -> bool {
    body.grounded = false;
    let dy = body.vel.y + VERTICAL_BIAS;
    body.pos.y += dy;

    let mut hit_ceiling = false;
    for platform in platforms {
        if !body.rect().intersects(&platform.rect) {
            continue;
        }
        if dy > 0.0 {
            body.set_bottom(platform.rect.top());
            body.vel.y = 0.0;
            body.grounded = true;
        } else if dy < 0.0 {
            body.set_top(platform.rect.bottom());
            body.vel.y = 0.0;
            hit_ceiling = true;
        }
    }
    hit_ceiling
}

/// Horizontal pass then vertical pass, no bounds handling
pub fn sweep(body: &mut Body, platforms: &[Platform]) -> SweepResult {
    let was_grounded = body.grounded;
    resolve_horizontal(body, platforms);
    let hit_ceiling = resolve_vertical(body, platforms);

    SweepResult {
        grounded: body.grounded,
        ground_event: GroundEvent::from_transition(was_grounded, body.grounded),
        hit_ceiling,
    }
}

/// Advance a body by one tick: sweep through the platforms, then apply the
/// level bounds.
///
/// Expects input and gravity to have been applied to `body.vel` already.
pub fn resolve_tick(
    body: &mut Body,
    platforms: &[Platform],
    bounds: &LevelBounds,
) -> TickOutcome {
    let swept = sweep(body, platforms);
    let boundary = clamp_to_bounds(body, bounds);

    TickOutcome {
        grounded: swept.grounded,
        ground_event: swept.ground_event,
        boundary,
    }
}

/// Depth of overlap between a body and a platform on each axis (zero when
/// they do not intersect). Used to check the no-interpenetration invariant.
pub fn penetration(body: &Body, platform: &Platform) -> Vec2 {
    let a = body.rect();
    let b = platform.rect;
    if !a.intersects(&b) {
        return Vec2::ZERO;
    }
    Vec2::new(
        a.right().min(b.right()) - a.left().max(b.left()),
        a.bottom().min(b.bottom()) - a.top().max(b.top()),
    )
}
