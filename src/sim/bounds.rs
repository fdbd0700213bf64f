//! World bounds: keep bodies inside the level, report falls out of it
//!
//! Left, right and top edges are containment walls. The bottom edge is a
//! death line instead: crossing it is reported to the caller and the body is
//! left where it is.

use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// Level extent in world units, with the origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
        }
    }
}

impl LevelBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bounds-related outcome for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryEvent {
    /// Body's bottom edge is below the level floor
    FellOutOfWorld,
}

/// Clamp the body's rectangle to the left, right and top edges of `bounds`.
///
/// Returns [`BoundaryEvent::FellOutOfWorld`] when the bottom edge is past the
/// level height. Horizontal velocity is kept, so a body pushing against a
/// level edge keeps its intent.
pub fn clamp_to_bounds(body: &mut Body, bounds: &LevelBounds) -> Option<BoundaryEvent> {
    let rect = body.rect();

    if rect.left() < 0.0 {
        body.set_left(0.0);
    } else if rect.right() > bounds.width {
        body.set_right(bounds.width);
    }

    if rect.top() < 0.0 {
        body.set_top(0.0);
    }

    if body.rect().bottom() > bounds.height {
        Some(BoundaryEvent::FellOutOfWorld)
    } else {
        None
    }
}
