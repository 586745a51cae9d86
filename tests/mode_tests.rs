//! Headless integration tests for the full input → mode → integration chain.
//!
//! These use [`MinimalPlugins`] — no window, no rendering — with the same
//! system ordering the real app registers, driving the pipeline purely
//! through the [`ControlIntent`] resource.

use bevy::prelude::*;
use yoyo::config::SimConfig;
use yoyo::input::{apply_intent_system, ControlIntent};
use yoyo::pendulum::{pendulum_step_system, Pendulum, Pivot, SwingMode};
use yoyo::theme::EffectsConfig;
use yoyo::trail::TrailBuffer;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app running apply-intent followed by one integration step per
/// frame, mirroring the real `Update` chain.
fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<ControlIntent>();
    app.init_resource::<Pendulum>();
    app.init_resource::<Pivot>();
    app.init_resource::<EffectsConfig>();
    app.init_resource::<TrailBuffer>();
    app.insert_resource(SimConfig::default());
    app.add_systems(Update, (apply_intent_system, pendulum_step_system).chain());
    app
}

/// Run one frame with the given intent, then clear it.
fn frame_with(app: &mut App, intent: ControlIntent) {
    app.insert_resource(intent);
    app.update();
    app.insert_resource(ControlIntent::default());
}

/// Run `n` frames with no input.
fn idle_frames(app: &mut App, n: usize) {
    app.insert_resource(ControlIntent::default());
    for _ in 0..n {
        app.update();
    }
}

fn pendulum(app: &App) -> Pendulum {
    *app.world().resource::<Pendulum>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn swing_toggle_starts_motion_from_rest() {
    let mut app = build_app();
    frame_with(
        &mut app,
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
    );
    let p = pendulum(&app);
    assert_eq!(p.mode, SwingMode::FreeSwing);
    // The integration step already ran this frame, so the angle moved.
    assert!(p.angle > 0.0, "angle = {}", p.angle);
}

#[test]
fn first_swing_frame_matches_the_closed_form() {
    let mut app = build_app();
    frame_with(
        &mut app,
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
    );
    // kickoff 0.05, damping 0.995: one step puts both at 0.04975.
    let p = pendulum(&app);
    assert!((p.angle - 0.04975).abs() < 1e-7, "angle = {}", p.angle);
    assert!(
        (p.angular_velocity - 0.04975).abs() < 1e-7,
        "v = {}",
        p.angular_velocity
    );
}

#[test]
fn pointer_down_mid_swing_takes_over_immediately() {
    let mut app = build_app();
    frame_with(
        &mut app,
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
    );
    idle_frames(&mut app, 30);
    assert_eq!(pendulum(&app).mode, SwingMode::FreeSwing);

    let pivot = app.world().resource::<Pivot>().0;
    frame_with(
        &mut app,
        ControlIntent {
            pointer_down: Some(pivot + Vec2::new(150.0, -150.0)),
            ..Default::default()
        },
    );
    assert_eq!(pendulum(&app).mode, SwingMode::PointerTrack);
}

#[test]
fn pointer_release_lands_in_idle_not_free_swing() {
    let mut app = build_app();
    let pivot = app.world().resource::<Pivot>().0;
    frame_with(
        &mut app,
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
    );
    frame_with(
        &mut app,
        ControlIntent {
            pointer_down: Some(pivot + Vec2::new(100.0, -50.0)),
            ..Default::default()
        },
    );
    frame_with(
        &mut app,
        ControlIntent {
            pointer_up: true,
            ..Default::default()
        },
    );
    let p = pendulum(&app);
    assert_eq!(p.mode, SwingMode::Idle);

    // Idle really is idle: nothing moves over further frames.
    let before = p;
    idle_frames(&mut app, 10);
    assert_eq!(pendulum(&app), before);
}

#[test]
fn held_pointer_eases_the_angle_toward_the_cursor() {
    let mut app = build_app();
    let pivot = app.world().resource::<Pivot>().0;
    // Grab straight-right of the pivot: target angle π/2.
    let grab = pivot + Vec2::new(200.0, 0.0);
    frame_with(
        &mut app,
        ControlIntent {
            pointer_down: Some(grab),
            ..Default::default()
        },
    );
    for _ in 0..150 {
        frame_with(
            &mut app,
            ControlIntent {
                pointer_at: Some(grab),
                ..Default::default()
            },
        );
    }
    let p = pendulum(&app);
    assert!(
        (p.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-2,
        "angle = {}",
        p.angle
    );
}

#[test]
fn reset_returns_the_fixed_initial_state_from_any_mode() {
    let mut app = build_app();
    let pivot = app.world().resource::<Pivot>().0;

    for setup in [
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
        ControlIntent {
            pointer_down: Some(pivot + Vec2::new(50.0, -50.0)),
            ..Default::default()
        },
        ControlIntent::default(),
    ] {
        frame_with(&mut app, setup);
        idle_frames(&mut app, 5);
        frame_with(
            &mut app,
            ControlIntent {
                reset: true,
                ..Default::default()
            },
        );
        let p = pendulum(&app);
        assert_eq!(p.mode, SwingMode::Idle);
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.angular_velocity, 0.0);
    }
}
