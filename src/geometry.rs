//! Pure pivot/angle/position math.
//!
//! The world is Bevy's y-up frame: angle 0 means the bob hangs straight
//! *down* from the pivot, positive angles swing toward +X.  The bob position
//! is always derived from `(pivot, angle, string_length)` — it is never
//! stored as ground truth anywhere in the simulation.

use bevy::prelude::*;

/// World-space bob centre for a given pivot, angle, and string length.
///
/// `pivot + string_length * (sin a, −cos a)`: at angle 0 the bob sits
/// `string_length` straight below the pivot.
pub fn bob_position(pivot: Vec2, angle: f32, string_length: f32) -> Vec2 {
    pivot + Vec2::new(angle.sin(), -angle.cos()) * string_length
}

/// Angle (radians, 0 = straight down) that points the string at `pointer`.
///
/// Returns `None` when either coordinate is non-finite or the pointer sits
/// exactly on the pivot, so upstream code can drop the event instead of
/// feeding NaN into the integrator.
pub fn pointer_angle(pivot: Vec2, pointer: Vec2) -> Option<f32> {
    if !pointer.x.is_finite() || !pointer.y.is_finite() {
        return None;
    }
    let offset = pointer - pivot;
    if offset == Vec2::ZERO {
        return None;
    }
    // atan2(dx, -dy): straight below the pivot (dy < 0) maps to angle 0.
    Some(offset.x.atan2(-offset.y))
}

/// Pivot position for a window of the given logical size.
///
/// Horizontally centred, a fixed offset below the top edge.  The camera sits
/// at the origin, so the top edge is at `+height/2`.
pub fn pivot_for_window(_width: f32, height: f32, top_offset: f32) -> Vec2 {
    Vec2::new(0.0, height / 2.0 - top_offset)
}

/// Convert a window cursor position (origin top-left, y-down) into world
/// coordinates (origin centre, y-up).
pub fn cursor_to_world(cursor: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(cursor.x - width / 2.0, -(cursor.y - height / 2.0))
}
