//! Simulation-specific error types.
//!
//! Nothing here is fatal: the toy clamps bad values to the nearest safe one
//! and keeps running.  The validators exist so `load_sim_config` can report
//! exactly *which* TOML value was rejected and why.

use std::fmt;

/// Top-level error enum for the pendulum simulation.
#[derive(Debug)]
pub enum SimError {
    /// A tunable is outside its safe operating range.
    /// Returned by the validation helpers below; the caller clamps and warns.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A pointer event carried a non-finite coordinate and was dropped.
    NonFinitePointer {
        /// The offending coordinates as received.
        x: f32,
        y: f32,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::NonFinitePointer { x, y } => {
                write!(f, "pointer event with non-finite coordinates ({}, {})", x, y)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `string_length` is strictly positive and finite.
///
/// A zero-length string would collapse the bob onto the pivot and make the
/// pointer-to-angle conversion degenerate.
pub fn validate_string_length(value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "string_length",
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `damping` lies strictly inside (0, 1).
///
/// At exactly 1.0 the swing never decays; above 1.0 it grows without bound.
pub fn validate_damping(value: f32) -> SimResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "damping",
            value,
            safe_range: "(0.0, 1.0)",
        })
    }
}

/// Returns an error unless `value` is finite and strictly positive.
///
/// Shared by the effect tunables (jitter, speed, fade, trail age) whose only
/// constraint is positivity; zero or negative values would make the spark
/// spawn ranges empty or the fade math degenerate.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `gravity_const` is in the tested stable range.
pub fn validate_gravity_const(value: f32) -> SimResult<()> {
    if value > 0.0 && value <= 0.002 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "gravity_const",
            value,
            safe_range: "(0.0, 0.002]",
        })
    }
}
