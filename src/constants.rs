//! Centralised simulation and effect constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! `SimConfig::default()` mirrors every constant; `assets/simulation.toml`
//! can override any subset at startup without recompiling.

// ── Window ────────────────────────────────────────────────────────────────────

/// Initial window width (px).
pub const WINDOW_WIDTH: f32 = 800.0;

/// Initial window height (px).
pub const WINDOW_HEIGHT: f32 = 600.0;

// ── Pendulum geometry ─────────────────────────────────────────────────────────

/// Length of the string from pivot to bob centre (world units).
///
/// Must be strictly positive; `load_sim_config` rejects non-positive values
/// and falls back to this default.
pub const STRING_LENGTH: f32 = 200.0;

/// Radius of the bob disc (world units).
pub const BOB_RADIUS: f32 = 20.0;

/// Vertical distance from the top edge of the window down to the pivot.
///
/// The pivot is always horizontally centred; re-derived on every resize.
pub const PIVOT_TOP_OFFSET: f32 = 100.0;

// ── Integration ───────────────────────────────────────────────────────────────

/// Gravity torque constant (rad/tick² per unit of `sin(angle)`).
///
/// Tested range: 0.0005–0.001.  Higher values swing faster but the small-angle
/// feel visibly degrades above ~0.002.
pub const GRAVITY_CONST: f32 = 0.0005;

/// Multiplicative angular-velocity decay applied every tick.
///
/// Must stay strictly inside (0, 1) so amplitude decays monotonically.
/// Tested range: 0.98–0.998.  At 0.995 a full-amplitude swing settles in
/// roughly 20 seconds at 60 fps.
pub const DAMPING: f32 = 0.995;

/// Angular velocity (rad/tick) seeded when a swing is started from rest.
///
/// Without this kick the bob would sit motionless at angle 0 forever, since
/// `sin(0) = 0` produces no torque.
pub const KICKOFF_SPEED: f32 = 0.05;

/// Exponential smoothing factor for pointer tracking.
///
/// Each tick the angle closes this fraction of the gap to the pointer-derived
/// target.  1.0 would snap instantly; 0.1 gives a weighty, elastic feel.
pub const TRACK_SMOOTHING: f32 = 0.1;

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Maximum number of trail points kept; the oldest is dropped beyond this.
pub const TRAIL_MAX_POINTS: usize = 24;

/// Maximum age (seconds) of a trail point before it is pruned.
///
/// Also the denominator of the per-point fade: alpha = 1 − age / max_age.
pub const TRAIL_MAX_AGE_SECS: f32 = 1.0;

// ── Sparks ────────────────────────────────────────────────────────────────────

/// Probability per frame of emitting a spark batch while effects are enabled.
pub const SPARK_EMIT_CHANCE: f64 = 0.1;

/// Number of sparks spawned per emission.
pub const SPARK_BATCH: u32 = 3;

/// Downward velocity increment (world units/tick) applied to every spark.
pub const SPARK_GRAVITY: f32 = 0.05;

/// Opacity decrement per tick.  Bounds spark lifetime at `1 / SPARK_FADE`
/// ticks (50 ticks ≈ 0.8 s at 60 fps).
pub const SPARK_FADE: f32 = 0.02;

/// Multiplicative size shrink per tick.
pub const SPARK_SHRINK: f32 = 0.96;

/// Sparks smaller than this radius (world units) are despawned.
pub const SPARK_MIN_SIZE: f32 = 0.3;

/// Maximum positional jitter (± world units, per axis) at spawn.
pub const SPARK_JITTER: f32 = 6.0;

/// Spawn speed range (world units/tick): each axis component is drawn from
/// ±`SPARK_SPEED`.
pub const SPARK_SPEED: f32 = 1.5;

/// Spawn size range (world units): radius drawn from [min, max].
pub const SPARK_SIZE_MIN: f32 = 1.5;
pub const SPARK_SIZE_MAX: f32 = 4.0;

// ── Decoration ────────────────────────────────────────────────────────────────

/// Number of spokes in the rotating bob decoration.
pub const SPOKE_COUNT: u32 = 4;

/// Spoke rotation rate (rad/s of wall-clock time).
pub const SPOKE_SPIN_RATE: f32 = 4.0;

/// HUD font size (px).
pub const HUD_FONT_SIZE: f32 = 18.0;
