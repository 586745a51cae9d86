//! Spark particle effects around the bob.
//!
//! Sparks are lightweight ECS entities with a [`Spark`] component holding the
//! kinematic state.  A three-system pipeline handles them:
//!
//! | System                     | Schedule | Purpose                                  |
//! |----------------------------|----------|------------------------------------------|
//! | `spark_emit_system`        | Update   | Stochastically spawn sparks at the bob   |
//! | `attach_spark_mesh_system` | Update   | Attach `Mesh2d` to freshly-spawned sparks |
//! | `spark_update_system`      | Update   | Move, fade, shrink, despawn expired sparks |
//!
//! A single shared disc mesh ([`SparkMesh`]) is created at startup to avoid
//! per-spark mesh allocation; per-spark size is expressed through the
//! transform scale.  Each spark gets its own [`ColorMaterial`] so its alpha
//! can fade individually.  Sparks never interact with one another, so
//! processing order within a frame is irrelevant.

use crate::config::SimConfig;
use crate::geometry;
use crate::pendulum::{Pendulum, Pivot};
use crate::theme::EffectsConfig;
use bevy::color::Alpha;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::Rng;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Shared unit-radius disc mesh used by all spark entities.
#[derive(Resource)]
pub struct SparkMesh(pub Handle<Mesh>);

// ── Component ─────────────────────────────────────────────────────────────────

/// Short-lived visual spark.
///
/// After spawning, `attach_spark_mesh_system` inserts the `Mesh2d` /
/// `MeshMaterial2d` pair and records the material handle so
/// `spark_update_system` can fade the alpha.
#[derive(Component, Debug, Clone)]
pub struct Spark {
    /// World-space velocity (units/tick).
    pub velocity: Vec2,
    /// Current opacity; the spark dies when this reaches 0.
    pub opacity: f32,
    /// Current radius (world units); the spark dies below the size floor.
    pub size: f32,
    /// Base colour, drawn from the active theme at spawn.
    pub color: Color,
    /// This spark's unique material; `None` until the attach system runs.
    pub material: Option<Handle<ColorMaterial>>,
}

impl Spark {
    /// Advance one tick: integrate position, pull velocity down, fade, and
    /// shrink.  Returns `false` once the spark should be despawned.
    pub fn advance(&mut self, position: &mut Vec2, config: &SimConfig) -> bool {
        *position += self.velocity;
        self.velocity.y -= config.spark_gravity;
        self.opacity -= config.spark_fade;
        self.size *= config.spark_shrink;
        self.opacity > 0.0 && self.size >= config.spark_min_size
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SparksPlugin;

impl Plugin for SparksPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_spark_mesh).add_systems(
            Update,
            (
                spark_emit_system,
                attach_spark_mesh_system,
                spark_update_system,
            )
                .chain(),
        );
    }
}

// ── Startup system ────────────────────────────────────────────────────────────

/// Create the shared disc mesh and store it as a [`SparkMesh`] resource.
fn init_spark_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(disc_mesh(1.0, 8));
    commands.insert_resource(SparkMesh(handle));
}

// ── Update systems ────────────────────────────────────────────────────────────

/// While effects are enabled, spawn a small spark batch at the bob position
/// with a fixed probability per frame.
///
/// Each spark gets positional jitter, a random bounded velocity, a random
/// size, full opacity, and a colour from the active theme's spark palette.
pub fn spark_emit_system(
    mut commands: Commands,
    effects: Res<EffectsConfig>,
    pendulum: Res<Pendulum>,
    pivot: Res<Pivot>,
    config: Res<SimConfig>,
) {
    if !effects.enabled {
        return;
    }
    let mut rng = rand::thread_rng();
    if !rng.gen_bool(config.spark_emit_chance) {
        return;
    }

    let bob = geometry::bob_position(pivot.0, pendulum.angle, config.string_length);
    let palette = effects.active_theme().sparks;

    for _ in 0..config.spark_batch {
        let jitter = Vec2::new(
            rng.gen_range(-config.spark_jitter..config.spark_jitter),
            rng.gen_range(-config.spark_jitter..config.spark_jitter),
        );
        let velocity = Vec2::new(
            rng.gen_range(-config.spark_speed..config.spark_speed),
            rng.gen_range(-config.spark_speed..config.spark_speed),
        );
        let size = rng.gen_range(config.spark_size_min..config.spark_size_max);
        let color = palette[rng.gen_range(0..palette.len())];

        commands.spawn((
            Spark {
                velocity,
                opacity: 1.0,
                size,
                color,
                material: None,
            },
            Transform::from_translation((bob + jitter).extend(0.9))
                .with_scale(Vec3::splat(size)),
            Visibility::default(),
        ));
    }
}

/// Attach `Mesh2d` + `MeshMaterial2d` to every newly-spawned [`Spark`].
///
/// Uses [`Added<Spark>`] so it only touches sparks that appeared since the
/// last frame.
pub fn attach_spark_mesh_system(
    mut commands: Commands,
    spark_mesh: Res<SparkMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Spark), Added<Spark>>,
) {
    for (entity, mut spark) in query.iter_mut() {
        let mat_handle = materials.add(ColorMaterial::from_color(spark.color));
        spark.material = Some(mat_handle.clone());
        commands
            .entity(entity)
            .insert((Mesh2d(spark_mesh.0.clone()), MeshMaterial2d(mat_handle)));
    }
}

/// Advance all sparks one tick and despawn the expired ones.
pub fn spark_update_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Transform, &mut Spark)>,
) {
    for (entity, mut transform, mut spark) in query.iter_mut() {
        let mut position = transform.translation.truncate();
        let alive = spark.advance(&mut position, &config);
        if !alive {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.scale = Vec3::splat(spark.size);

        if let Some(ref handle) = spark.material {
            if let Some(mat) = materials.get_mut(handle) {
                mat.color = spark.color.with_alpha(spark.opacity);
            }
        }
    }
}

// ── Mesh helper ───────────────────────────────────────────────────────────────

/// Build a filled disc as a triangle fan: centre vertex plus `sides` rim
/// vertices.
///
/// Flat-coloured discs (sparks, bob body, glow) are the only consumers, so
/// the mesh carries positions and indices only; the untextured colour
/// shader never samples UVs.
pub fn disc_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    positions.push([0.0, 0.0, 0.0]);
    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        positions.push([radius * angle.cos(), radius * angle.sin(), 0.0]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        indices.extend_from_slice(&[0, i + 1, (i + 1) % n as u32 + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

// ── Unit tests ────────────────────────────────────────────────────────────────
