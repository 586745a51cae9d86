//! Render pass: camera, retained bob meshes, gizmo overlays, and the mode HUD.
//!
//! ## Layer model
//!
//! | Layer                  | Technology | Shown when                       |
//! |------------------------|------------|----------------------------------|
//! | Trail polyline         | Gizmos     | non-empty trail                  |
//! | String (gradient)      | Gizmos     | always                           |
//! | Pivot mount            | Gizmos     | always                           |
//! | Glow disc              | `Mesh2d`   | effects enabled                  |
//! | Bob body disc          | `Mesh2d`   | always                           |
//! | Bob outer/detail rings | Gizmos     | always                           |
//! | Rotating spokes        | Gizmos     | FreeSwing or PointerTrack        |
//! | Mode HUD               | Bevy UI    | always                           |
//!
//! Every system here only *reads* simulation state ([`Pendulum`], [`Pivot`],
//! [`TrailBuffer`], [`EffectsConfig`]); the only writes are to render-side
//! entities (bob/glow transforms, materials, HUD text).

use crate::config::SimConfig;
use crate::geometry;
use crate::pendulum::{Pendulum, Pivot, SwingMode};
use crate::sparks::disc_mesh;
use crate::theme::EffectsConfig;
use crate::trail::TrailBuffer;
use bevy::color::{Alpha, Mix};
use bevy::prelude::*;

/// Segments used to approximate the string's colour gradient.
const STRING_SEGMENTS: u32 = 12;

// ── Marker components ─────────────────────────────────────────────────────────

/// The bob's filled body disc.
#[derive(Component)]
pub struct BobBody;

/// Translucent glow disc behind the bob; visible only while effects are on.
#[derive(Component)]
pub struct BobGlow;

/// Root node of the mode/controls HUD.
#[derive(Component)]
pub struct HudModeDisplay;

// ── Startup systems ───────────────────────────────────────────────────────────

/// Setup camera for 2D rendering.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Spawn the retained bob body and glow discs at the resting bob position.
///
/// Their transforms are updated every frame by [`bob_visual_system`]; their
/// materials are rewritten when the theme changes.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<SimConfig>,
    effects: Res<EffectsConfig>,
    pivot: Res<Pivot>,
) {
    let theme = effects.active_theme();
    let bob = geometry::bob_position(pivot.0, 0.0, config.string_length);

    let body_mesh = meshes.add(disc_mesh(config.bob_radius, 32));
    let body_mat = materials.add(ColorMaterial::from_color(theme.bob_body));
    commands.spawn((
        Mesh2d(body_mesh),
        MeshMaterial2d(body_mat),
        Transform::from_translation(bob.extend(0.5)),
        BobBody,
    ));

    let glow_mesh = meshes.add(disc_mesh(config.bob_radius * 1.9, 32));
    let glow_mat = materials.add(ColorMaterial::from_color(theme.glow));
    commands.spawn((
        Mesh2d(glow_mesh),
        MeshMaterial2d(glow_mat),
        Transform::from_translation(bob.extend(0.3)),
        Visibility::Hidden,
        BobGlow,
    ));
}

/// Spawn the top-left mode/controls HUD.
pub fn setup_hud(mut commands: Commands, config: Res<SimConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudModeDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.88, 0.92)),
            ));
        });
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Reposition the bob body and glow to the derived bob position, and sync the
/// glow's visibility with the effects toggle.
pub fn bob_visual_system(
    pendulum: Res<Pendulum>,
    pivot: Res<Pivot>,
    config: Res<SimConfig>,
    effects: Res<EffectsConfig>,
    mut q_body: Query<&mut Transform, (With<BobBody>, Without<BobGlow>)>,
    mut q_glow: Query<(&mut Transform, &mut Visibility), (With<BobGlow>, Without<BobBody>)>,
) {
    let bob = geometry::bob_position(pivot.0, pendulum.angle, config.string_length);

    if let Ok(mut transform) = q_body.single_mut() {
        transform.translation.x = bob.x;
        transform.translation.y = bob.y;
    }
    if let Ok((mut transform, mut visibility)) = q_glow.single_mut() {
        transform.translation.x = bob.x;
        transform.translation.y = bob.y;
        *visibility = if effects.enabled {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Rewrite the bob and glow materials when the theme changes.
///
/// Gated on [`EffectsConfig`] change detection, so the per-frame cost is zero
/// outside of an actual toggle.
pub fn sync_bob_theme_system(
    effects: Res<EffectsConfig>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q_body: Query<&MeshMaterial2d<ColorMaterial>, With<BobBody>>,
    q_glow: Query<&MeshMaterial2d<ColorMaterial>, With<BobGlow>>,
) {
    if !effects.is_changed() {
        return;
    }
    let theme = effects.active_theme();
    if let Ok(handle) = q_body.single() {
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.color = theme.bob_body;
        }
    }
    if let Ok(handle) = q_glow.single() {
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.color = theme.glow;
        }
    }
}

/// Draw the per-frame gizmo layers: trail, string, pivot mount, bob rings,
/// and the rotating spoke decoration.
pub fn scene_gizmo_system(
    mut gizmos: Gizmos,
    pendulum: Res<Pendulum>,
    pivot: Res<Pivot>,
    trail: Res<TrailBuffer>,
    effects: Res<EffectsConfig>,
    config: Res<SimConfig>,
    time: Res<Time>,
) {
    let theme = effects.active_theme();
    let bob = geometry::bob_position(pivot.0, pendulum.angle, config.string_length);
    let now = time.elapsed_secs();

    // ── Trail ────────────────────────────────────────────────────────────────
    // Oldest-first segments; each takes the alpha of its older endpoint so the
    // stroke dissolves smoothly toward the tail.
    let points: Vec<_> = trail.iter().collect();
    for pair in points.windows(2) {
        let age = now - pair[0].spawned_at;
        let alpha = TrailBuffer::fade(age, config.trail_max_age_secs) * 0.6;
        if alpha <= 0.0 {
            continue;
        }
        gizmos.line_2d(pair[0].position, pair[1].position, theme.trail.with_alpha(alpha));
    }
    // Close the gap between the newest sample and the live bob position.
    if let Some(last) = points.last() {
        gizmos.line_2d(last.position, bob, theme.trail.with_alpha(0.6));
    }

    // ── String ───────────────────────────────────────────────────────────────
    // Approximate the pivot-to-bob gradient with short flat-coloured segments.
    for i in 0..STRING_SEGMENTS {
        let t0 = i as f32 / STRING_SEGMENTS as f32;
        let t1 = (i + 1) as f32 / STRING_SEGMENTS as f32;
        let color = theme.string_top.mix(&theme.string_bottom, t0);
        gizmos.line_2d(pivot.0.lerp(bob, t0), pivot.0.lerp(bob, t1), color);
    }

    // ── Pivot mount ──────────────────────────────────────────────────────────
    gizmos.circle_2d(pivot.0, 4.0, theme.string_top);

    // ── Bob rings ────────────────────────────────────────────────────────────
    gizmos.circle_2d(bob, config.bob_radius, theme.bob_ring);
    gizmos.circle_2d(bob, config.bob_radius * 0.7, theme.string_top.with_alpha(0.8));

    // ── Rotating spokes (only while actively driven) ─────────────────────────
    if pendulum.mode != SwingMode::Idle {
        let phase = now * config.spoke_spin_rate;
        for k in 0..config.spoke_count {
            let angle = phase + k as f32 * std::f32::consts::TAU / config.spoke_count as f32;
            let dir = Vec2::new(angle.cos(), angle.sin());
            gizmos.line_2d(bob, bob + dir * config.bob_radius * 0.6, theme.bob_ring);
        }
    }
}

/// Refresh the HUD with the current mode, effects state, and theme name.
pub fn hud_mode_display_system(
    pendulum: Res<Pendulum>,
    effects: Res<EffectsConfig>,
    parent_query: Query<&Children, With<HudModeDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "Mode: {} | Effects: {} | Theme: {}\n\
                     [drag] grab   [Space] swing   [E] effects   [C] theme   [R] reset",
                    pendulum.mode.label(),
                    if effects.enabled { "on" } else { "off" },
                    effects.active_theme().name,
                ));
            }
        }
    }
}
