//! Input handling: raw devices → [`ControlIntent`] → simulation mutations.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`intent_clear_system`] — resets `ControlIntent` to its empty state.
//! 2. [`keyboard_to_intent_system`] — maps Space/E/C/R to the discrete actions.
//! 3. [`mouse_to_intent_system`] — maps button state + cursor to pointer fields.
//! 4. [`apply_intent_system`] — the **only** system that mutates the pendulum,
//!    effects config, trail, or spark set from input.
//!
//! The intent abstraction makes the whole control surface testable: tests
//! populate the resource directly and run only the apply step, with no window
//! or input device anywhere.

use crate::config::SimConfig;
use crate::error::SimError;
use crate::geometry;
use crate::pendulum::{Pendulum, Pivot};
use crate::sparks::Spark;
use crate::theme::EffectsConfig;
use crate::trail::TrailBuffer;
use bevy::prelude::*;
use bevy::window::WindowResized;

// ── Intent resource ───────────────────────────────────────────────────────────

/// Aggregated control intent for the current frame, from all input sources.
///
/// Cleared at the top of every frame; keyboard and mouse systems set fields;
/// [`apply_intent_system`] consumes them.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ControlIntent {
    /// Pointer was pressed this frame; carries the world-space position.
    pub pointer_down: Option<Vec2>,
    /// Pointer is held and the cursor is at this world-space position.
    pub pointer_at: Option<Vec2>,
    /// Pointer was released this frame.
    pub pointer_up: bool,
    /// Start/stop the autonomous swing.
    pub toggle_swing: bool,
    /// Flip trail/spark/glow effects on or off.
    pub toggle_effects: bool,
    /// Advance to the next colour theme.
    pub cycle_theme: bool,
    /// Return everything to the initial state.
    pub reset: bool,
}

// ── Step 1: clear ─────────────────────────────────────────────────────────────

/// Reset [`ControlIntent`] at the start of every frame.
///
/// Must run before any system that writes intent fields.
pub fn intent_clear_system(mut intent: ResMut<ControlIntent>) {
    *intent = ControlIntent::default();
}

// ── Step 2a: keyboard → intent ────────────────────────────────────────────────

/// Map the discrete action keys onto [`ControlIntent`].
///
/// - **Space** → toggle swing
/// - **E** → toggle effects
/// - **C** → cycle colour theme
/// - **R** → reset
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<ControlIntent>,
) {
    if keys.just_pressed(KeyCode::Space) {
        intent.toggle_swing = true;
    }
    if keys.just_pressed(KeyCode::KeyE) {
        intent.toggle_effects = true;
    }
    if keys.just_pressed(KeyCode::KeyC) {
        intent.cycle_theme = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        intent.reset = true;
    }
}

// ── Step 2b: mouse → intent ───────────────────────────────────────────────────

/// Map left-button state and cursor position onto the pointer intent fields.
///
/// Cursor coordinates arrive in window space (origin top-left, y-down) and
/// are converted to world space here so everything downstream works in one
/// frame of reference.
pub fn mouse_to_intent_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut intent: ResMut<ControlIntent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let world_cursor = window
        .cursor_position()
        .map(|cursor| geometry::cursor_to_world(cursor, window.width(), window.height()));

    if buttons.just_pressed(MouseButton::Left) {
        intent.pointer_down = world_cursor;
    }
    if buttons.pressed(MouseButton::Left) {
        intent.pointer_at = world_cursor;
    }
    if buttons.just_released(MouseButton::Left) {
        intent.pointer_up = true;
    }
}

// ── Step 3: apply intent ──────────────────────────────────────────────────────

/// Drive the mode machine and effect toggles from the frame's intent.
///
/// Reset wins over everything else in the same frame and restores the full
/// initial state: pendulum at rest, empty trail, no sparks, effects off.
/// Pointer-down beats the swing toggle, per the mode machine's precedence.
/// Pointer positions with non-finite coordinates are dropped with a logged
/// warning; a pointer exactly on the pivot has no defined angle and is
/// dropped silently.
#[allow(clippy::too_many_arguments)]
pub fn apply_intent_system(
    mut commands: Commands,
    intent: Res<ControlIntent>,
    mut pendulum: ResMut<Pendulum>,
    mut effects: ResMut<EffectsConfig>,
    mut trail: ResMut<TrailBuffer>,
    pivot: Res<Pivot>,
    config: Res<SimConfig>,
    sparks: Query<Entity, With<Spark>>,
) {
    if intent.reset {
        pendulum.reset();
        trail.clear();
        *effects = EffectsConfig::default();
        for entity in sparks.iter() {
            commands.entity(entity).despawn();
        }
        info!("Simulation reset");
        return;
    }

    if let Some(position) = intent.pointer_down {
        if let Some(angle) = resolve_pointer_angle(pivot.0, position) {
            pendulum.pointer_down(angle);
        }
    } else if let Some(position) = intent.pointer_at {
        if let Some(angle) = resolve_pointer_angle(pivot.0, position) {
            pendulum.pointer_move(angle);
        }
    }
    if intent.pointer_up {
        pendulum.pointer_up();
    }

    if intent.toggle_swing {
        pendulum.toggle_swing(&config);
    }
    if intent.toggle_effects {
        effects.enabled = !effects.enabled;
    }
    if intent.cycle_theme {
        effects.cycle_theme();
        info!("Theme: {}", effects.active_theme().name);
    }
}

/// Pointer position → target angle, warning on non-finite coordinates.
fn resolve_pointer_angle(pivot: Vec2, position: Vec2) -> Option<f32> {
    if !position.x.is_finite() || !position.y.is_finite() {
        warn!(
            "{}",
            SimError::NonFinitePointer {
                x: position.x,
                y: position.y,
            }
        );
        return None;
    }
    geometry::pointer_angle(pivot, position)
}

// ── Resize ────────────────────────────────────────────────────────────────────

/// Re-derive the pivot when the window is resized: horizontally centred, a
/// fixed offset below the top edge.
pub fn window_resize_system(
    mut events: MessageReader<WindowResized>,
    mut pivot: ResMut<Pivot>,
    config: Res<SimConfig>,
) {
    for event in events.read() {
        pivot.0 = geometry::pivot_for_window(event.width, event.height, config.pivot_top_offset);
        info!("Window resized to {}x{}; pivot at {:?}", event.width, event.height, pivot.0);
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
