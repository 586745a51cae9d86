//! Headless integration tests for the trail and spark effect pipelines.
//!
//! The spark systems normally get their `Assets` storages from the render
//! stack; here they are inserted directly so the whole effects pipeline runs
//! under [`MinimalPlugins`].  `spark_emit_chance` is forced to 1.0 so the
//! stochastic emitter becomes deterministic for counting.

use bevy::prelude::*;
use yoyo::config::SimConfig;
use yoyo::input::{apply_intent_system, ControlIntent};
use yoyo::pendulum::{pendulum_step_system, Pendulum, Pivot, SwingMode};
use yoyo::sparks::{Spark, SparksPlugin};
use yoyo::theme::EffectsConfig;
use yoyo::trail::{trail_update_system, TrailBuffer};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<ColorMaterial>::default());
    app.init_resource::<ControlIntent>();
    app.init_resource::<Pendulum>();
    app.init_resource::<Pivot>();
    app.init_resource::<EffectsConfig>();
    app.init_resource::<TrailBuffer>();
    app.insert_resource(SimConfig {
        // Deterministic emission: a batch every frame while effects are on.
        spark_emit_chance: 1.0,
        ..Default::default()
    });
    app.add_systems(
        Update,
        (apply_intent_system, pendulum_step_system, trail_update_system).chain(),
    );
    app.add_plugins(SparksPlugin);
    app
}

fn frame_with(app: &mut App, intent: ControlIntent) {
    app.insert_resource(intent);
    app.update();
    app.insert_resource(ControlIntent::default());
}

fn idle_frames(app: &mut App, n: usize) {
    app.insert_resource(ControlIntent::default());
    for _ in 0..n {
        app.update();
    }
}

fn toggle_effects(app: &mut App) {
    frame_with(
        app,
        ControlIntent {
            toggle_effects: true,
            ..Default::default()
        },
    );
}

fn spark_count(app: &mut App) -> usize {
    app.world_mut().query::<&Spark>().iter(app.world()).count()
}

// ── Trail ─────────────────────────────────────────────────────────────────────

#[test]
fn trail_stays_within_the_configured_bound() {
    let mut app = build_app();
    let max = app.world().resource::<SimConfig>().trail_max_points;
    toggle_effects(&mut app);
    for _ in 0..100 {
        app.update();
        assert!(app.world().resource::<TrailBuffer>().len() <= max);
    }
    // The buffer actually fills to its bound while effects stay on.
    assert_eq!(app.world().resource::<TrailBuffer>().len(), max);
}

#[test]
fn trail_is_not_sampled_while_effects_are_off() {
    let mut app = build_app();
    idle_frames(&mut app, 30);
    assert!(app.world().resource::<TrailBuffer>().is_empty());
}

#[test]
fn reset_mid_accumulation_empties_the_trail_and_idles() {
    let mut app = build_app();
    toggle_effects(&mut app);
    frame_with(
        &mut app,
        ControlIntent {
            toggle_swing: true,
            ..Default::default()
        },
    );
    idle_frames(&mut app, 15);
    assert!(app.world().resource::<TrailBuffer>().len() >= 15);

    frame_with(
        &mut app,
        ControlIntent {
            reset: true,
            ..Default::default()
        },
    );
    assert_eq!(app.world().resource::<TrailBuffer>().len(), 0);
    assert_eq!(app.world().resource::<Pendulum>().mode, SwingMode::Idle);
}

// ── Sparks ────────────────────────────────────────────────────────────────────

#[test]
fn sparks_are_only_emitted_while_effects_are_on() {
    let mut app = build_app();
    idle_frames(&mut app, 20);
    assert_eq!(spark_count(&mut app), 0);

    toggle_effects(&mut app);
    idle_frames(&mut app, 5);
    assert!(spark_count(&mut app) > 0);
}

#[test]
fn spark_population_is_bounded_by_batch_times_lifetime() {
    let mut app = build_app();
    let config = app.world().resource::<SimConfig>().clone();
    let lifetime_ticks = (1.0 / config.spark_fade).ceil() as usize;
    let bound = config.spark_batch as usize * (lifetime_ticks + 1);

    toggle_effects(&mut app);
    for _ in 0..200 {
        app.update();
        assert!(
            spark_count(&mut app) <= bound,
            "spark population exceeded {bound}"
        );
    }
}

#[test]
fn all_sparks_expire_after_emission_stops() {
    let mut app = build_app();
    toggle_effects(&mut app);
    idle_frames(&mut app, 30);
    assert!(spark_count(&mut app) > 0);

    // Toggle effects off, then wait out the maximum lifetime.
    toggle_effects(&mut app);
    let lifetime_ticks = {
        let config = app.world().resource::<SimConfig>();
        (1.0 / config.spark_fade).ceil() as usize
    };
    idle_frames(&mut app, lifetime_ticks + 2);
    assert_eq!(spark_count(&mut app), 0);
}

#[test]
fn reset_despawns_every_spark() {
    let mut app = build_app();
    toggle_effects(&mut app);
    idle_frames(&mut app, 30);
    assert!(spark_count(&mut app) > 0);

    frame_with(
        &mut app,
        ControlIntent {
            reset: true,
            ..Default::default()
        },
    );
    assert_eq!(spark_count(&mut app), 0);
}
