use bevy::prelude::*;
use bevy::window::WindowResolution;

use yoyo::config::{load_sim_config, SimConfig};
use yoyo::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use yoyo::pendulum::PendulumPlugin;
use yoyo::rendering;
use yoyo::sparks::SparksPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Yo-Yo".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.07, 0.08, 0.10)))
        // Insert SimConfig with compiled defaults; load_sim_config will
        // overwrite it from assets/simulation.toml (if present) at startup.
        .insert_resource(SimConfig::default())
        .add_plugins(PendulumPlugin)
        .add_plugins(SparksPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                load_sim_config,
                rendering::setup_camera.after(load_sim_config),
                rendering::setup_scene.after(load_sim_config),
                rendering::setup_hud.after(load_sim_config),
            ),
        )
        .add_systems(
            Update,
            (
                rendering::bob_visual_system,
                rendering::sync_bob_theme_system,
                rendering::scene_gizmo_system,
                rendering::hud_mode_display_system,
            ),
        )
        .run();
}
