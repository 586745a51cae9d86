//! Runtime simulation configuration loaded from `assets/simulation.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/simulation.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time defaults,
//! so a minimal TOML can override just the values you care about.
//!
//! Values that would destabilise the integrator (non-positive string length,
//! damping outside (0, 1), out-of-range gravity) are rejected with a logged
//! warning and reset to their defaults — the toy never refuses to start over
//! a bad config.

use crate::constants::*;
use crate::error::{
    validate_damping, validate_gravity_const, validate_positive, validate_string_length,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable simulation and effects configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset in `assets/simulation.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Pendulum ─────────────────────────────────────────────────────────────
    pub string_length: f32,
    pub bob_radius: f32,
    pub pivot_top_offset: f32,
    pub gravity_const: f32,
    pub damping: f32,
    pub kickoff_speed: f32,
    pub track_smoothing: f32,

    // ── Trail ────────────────────────────────────────────────────────────────
    pub trail_max_points: usize,
    pub trail_max_age_secs: f32,

    // ── Sparks ───────────────────────────────────────────────────────────────
    pub spark_emit_chance: f64,
    pub spark_batch: u32,
    pub spark_gravity: f32,
    pub spark_fade: f32,
    pub spark_shrink: f32,
    pub spark_min_size: f32,
    pub spark_jitter: f32,
    pub spark_speed: f32,
    pub spark_size_min: f32,
    pub spark_size_max: f32,

    // ── Decoration / HUD ─────────────────────────────────────────────────────
    pub spoke_count: u32,
    pub spoke_spin_rate: f32,
    pub hud_font_size: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Pendulum
            string_length: STRING_LENGTH,
            bob_radius: BOB_RADIUS,
            pivot_top_offset: PIVOT_TOP_OFFSET,
            gravity_const: GRAVITY_CONST,
            damping: DAMPING,
            kickoff_speed: KICKOFF_SPEED,
            track_smoothing: TRACK_SMOOTHING,
            // Trail
            trail_max_points: TRAIL_MAX_POINTS,
            trail_max_age_secs: TRAIL_MAX_AGE_SECS,
            // Sparks
            spark_emit_chance: SPARK_EMIT_CHANCE,
            spark_batch: SPARK_BATCH,
            spark_gravity: SPARK_GRAVITY,
            spark_fade: SPARK_FADE,
            spark_shrink: SPARK_SHRINK,
            spark_min_size: SPARK_MIN_SIZE,
            spark_jitter: SPARK_JITTER,
            spark_speed: SPARK_SPEED,
            spark_size_min: SPARK_SIZE_MIN,
            spark_size_max: SPARK_SIZE_MAX,
            // Decoration / HUD
            spoke_count: SPOKE_COUNT,
            spoke_spin_rate: SPOKE_SPIN_RATE,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl SimConfig {
    /// Replace any unsafe value with its compile-time default, logging each
    /// rejection.  Called on every loaded config before it is installed.
    pub fn sanitize(&mut self) {
        if let Err(e) = validate_string_length(self.string_length) {
            warn!("{e}; using default {STRING_LENGTH}");
            self.string_length = STRING_LENGTH;
        }
        if let Err(e) = validate_damping(self.damping) {
            warn!("{e}; using default {DAMPING}");
            self.damping = DAMPING;
        }
        if let Err(e) = validate_gravity_const(self.gravity_const) {
            warn!("{e}; using default {GRAVITY_CONST}");
            self.gravity_const = GRAVITY_CONST;
        }
        if !(0.0..=1.0).contains(&self.spark_emit_chance) {
            warn!(
                "spark_emit_chance {} outside [0, 1]; using default {SPARK_EMIT_CHANCE}",
                self.spark_emit_chance
            );
            self.spark_emit_chance = SPARK_EMIT_CHANCE;
        }
        if !(self.track_smoothing > 0.0 && self.track_smoothing <= 1.0) {
            warn!(
                "track_smoothing {} outside (0, 1]; using default {TRACK_SMOOTHING}",
                self.track_smoothing
            );
            self.track_smoothing = TRACK_SMOOTHING;
        }
        // Effect tunables: zero or negative values would make the spark spawn
        // ranges empty or leave sparks immortal; the trail fade divides by the
        // max age.
        if let Err(e) = validate_positive("spark_jitter", self.spark_jitter) {
            warn!("{e}; using default {SPARK_JITTER}");
            self.spark_jitter = SPARK_JITTER;
        }
        if let Err(e) = validate_positive("spark_speed", self.spark_speed) {
            warn!("{e}; using default {SPARK_SPEED}");
            self.spark_speed = SPARK_SPEED;
        }
        if let Err(e) = validate_positive("spark_fade", self.spark_fade) {
            warn!("{e}; using default {SPARK_FADE}");
            self.spark_fade = SPARK_FADE;
        }
        if let Err(e) = validate_positive("trail_max_age_secs", self.trail_max_age_secs) {
            warn!("{e}; using default {TRAIL_MAX_AGE_SECS}");
            self.trail_max_age_secs = TRAIL_MAX_AGE_SECS;
        }
        if !(self.spark_shrink > 0.0 && self.spark_shrink < 1.0) {
            warn!(
                "spark_shrink {} outside (0, 1); using default {SPARK_SHRINK}",
                self.spark_shrink
            );
            self.spark_shrink = SPARK_SHRINK;
        }
        if !(self.spark_size_min > 0.0 && self.spark_size_min < self.spark_size_max) {
            warn!(
                "spark size range [{}, {}) is empty or non-positive; using defaults \
                 [{SPARK_SIZE_MIN}, {SPARK_SIZE_MAX})",
                self.spark_size_min, self.spark_size_max
            );
            self.spark_size_min = SPARK_SIZE_MIN;
            self.spark_size_max = SPARK_SIZE_MAX;
        }
    }
}

/// Startup system: attempt to load `assets/simulation.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the simulation.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    let path = "assets/simulation.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
            Ok(mut loaded) => {
                loaded.sanitize();
                *config = loaded;
                info!("Loaded simulation config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = SimConfig::default();
        assert_eq!(config.string_length, STRING_LENGTH);
        assert_eq!(config.damping, DAMPING);
        assert_eq!(config.trail_max_points, TRAIL_MAX_POINTS);
    }

    #[test]
    fn sanitize_restores_unsafe_values() {
        let mut config = SimConfig {
            string_length: 0.0,
            damping: 1.5,
            gravity_const: -1.0,
            spark_emit_chance: 2.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.string_length, STRING_LENGTH);
        assert_eq!(config.damping, DAMPING);
        assert_eq!(config.gravity_const, GRAVITY_CONST);
        assert_eq!(config.spark_emit_chance, SPARK_EMIT_CHANCE);
    }

    #[test]
    fn sanitize_restores_degenerate_effect_values() {
        // Zero jitter/speed would make the spark spawn ranges empty; zero fade
        // would make sparks immortal; zero trail age would divide by zero in
        // the fade; an inverted size range has nothing to sample.
        let mut config = SimConfig {
            spark_jitter: 0.0,
            spark_speed: -1.0,
            spark_fade: 0.0,
            spark_shrink: 1.2,
            trail_max_age_secs: 0.0,
            spark_size_min: 5.0,
            spark_size_max: 2.0,
            track_smoothing: 3.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.spark_jitter, SPARK_JITTER);
        assert_eq!(config.spark_speed, SPARK_SPEED);
        assert_eq!(config.spark_fade, SPARK_FADE);
        assert_eq!(config.spark_shrink, SPARK_SHRINK);
        assert_eq!(config.trail_max_age_secs, TRAIL_MAX_AGE_SECS);
        assert_eq!(config.spark_size_min, SPARK_SIZE_MIN);
        assert_eq!(config.spark_size_max, SPARK_SIZE_MAX);
        assert_eq!(config.track_smoothing, TRACK_SMOOTHING);
    }

    #[test]
    fn sanitize_keeps_valid_overrides() {
        let mut config = SimConfig {
            string_length: 150.0,
            damping: 0.98,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.string_length, 150.0);
        assert_eq!(config.damping, 0.98);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let mut loaded: SimConfig = toml::from_str("damping = 0.99\n").unwrap();
        loaded.sanitize();
        assert_eq!(loaded.damping, 0.99);
        assert_eq!(loaded.string_length, STRING_LENGTH);
    }
}
