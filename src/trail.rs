//! Fading trail of recent bob positions.
//!
//! The buffer owns its points exclusively: sampled once per frame while
//! effects are enabled, pruned by age and by count, cleared wholesale on
//! reset.  Insertion order is oldest-first so the rendered path traces
//! continuously from the oldest point to the current bob position.

use crate::config::SimConfig;
use crate::geometry;
use crate::pendulum::{Pendulum, Pivot};
use crate::theme::EffectsConfig;
use bevy::prelude::*;
use std::collections::VecDeque;

/// One sampled bob position with its creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    /// Seconds of app time at sampling, from `Time::elapsed_secs`.
    pub spawned_at: f32,
}

/// Bounded, age-expiring history of bob positions.
#[derive(Resource, Debug, Default)]
pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
}

impl TrailBuffer {
    /// Append a sample at the back (newest end).
    pub fn sample(&mut self, position: Vec2, now: f32) {
        self.points.push_back(TrailPoint {
            position,
            spawned_at: now,
        });
    }

    /// Drop points older than `max_age_secs` and, beyond that, the oldest
    /// points until at most `max_points` remain.
    pub fn prune(&mut self, now: f32, max_age_secs: f32, max_points: usize) {
        while let Some(front) = self.points.front() {
            if now - front.spawned_at > max_age_secs {
                self.points.pop_front();
            } else {
                break;
            }
        }
        while self.points.len() > max_points {
            self.points.pop_front();
        }
    }

    /// Stroke alpha for a point of the given age: `1 − age / max_age`,
    /// clamped to [0, 1].
    pub fn fade(age_secs: f32, max_age_secs: f32) -> f32 {
        (1.0 - age_secs / max_age_secs).clamp(0.0, 1.0)
    }

    /// Points oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove every point (reset path).
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Per-frame trail maintenance: sample the current bob position while effects
/// are enabled, then prune.  Pruning runs unconditionally so a trail left
/// behind by toggling effects off still dissolves instead of freezing.
pub fn trail_update_system(
    mut trail: ResMut<TrailBuffer>,
    pendulum: Res<Pendulum>,
    pivot: Res<Pivot>,
    effects: Res<EffectsConfig>,
    config: Res<SimConfig>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    if effects.enabled {
        let bob = geometry::bob_position(pivot.0, pendulum.angle, config.string_length);
        trail.sample(bob, now);
    }
    trail.prune(now, config.trail_max_age_secs, config.trail_max_points);
}
