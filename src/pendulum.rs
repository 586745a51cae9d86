//! Pendulum state, integrator, and mode machine.
//!
//! [`Pendulum`] is a plain resource with behaviour methods so the whole core
//! — integration *and* mode transitions — is testable headlessly, without a
//! window or any rendering.  Systems are thin wrappers that call into it.
//!
//! ## Frame pipeline (runs in order every `Update` frame)
//!
//! 1. [`crate::input::intent_clear_system`] — resets [`crate::input::ControlIntent`].
//! 2. [`crate::input::keyboard_to_intent_system`] / [`crate::input::mouse_to_intent_system`]
//!    — translate raw input into intent fields.
//! 3. [`crate::input::apply_intent_system`] — drives the mode machine and effect toggles.
//! 4. [`pendulum_step_system`] — one integration tick.
//! 5. [`crate::trail::trail_update_system`] — samples and prunes the trail.
//!
//! Spark systems run in their own plugin ([`crate::sparks::SparksPlugin`]) after
//! this chain; rendering reads the results the same frame.

use crate::config::SimConfig;
use crate::geometry;
use bevy::prelude::*;

/// Which control law drives the pendulum this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwingMode {
    /// At rest; state is untouched by the integrator.
    #[default]
    Idle,
    /// Autonomous damped swing under gravity torque.
    FreeSwing,
    /// Angle eased toward the pointer-derived target each tick.
    PointerTrack,
}

impl SwingMode {
    /// Human-readable label for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            SwingMode::Idle => "Idle",
            SwingMode::FreeSwing => "Swinging",
            SwingMode::PointerTrack => "Pointer",
        }
    }
}

/// World-space string anchor; re-derived on window resize, immutable otherwise.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Pivot(pub Vec2);

impl Default for Pivot {
    fn default() -> Self {
        Self(geometry::pivot_for_window(
            crate::constants::WINDOW_WIDTH,
            crate::constants::WINDOW_HEIGHT,
            crate::constants::PIVOT_TOP_OFFSET,
        ))
    }
}

/// The simulation core: angle, angular velocity, and the active control mode.
///
/// The angle is unconstrained — long pointer-driven spins can wind it far past
/// ±2π and nothing wraps it.  Consumers must go through `sin`/`cos`
/// ([`geometry::bob_position`]) and never assume a bounded range.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Pendulum {
    /// Radians; 0 = hanging straight down, positive toward +X.
    pub angle: f32,
    /// Radians per tick.
    pub angular_velocity: f32,
    /// Active control law.
    pub mode: SwingMode,
    /// Target angle while pointer-tracking; ignored in other modes.
    pub track_target: f32,
}

impl Pendulum {
    /// Advance the state by one tick under the active mode.
    ///
    /// FreeSwing is a symplectic-Euler-like damped pendulum update; with
    /// damping strictly inside (0, 1) the amplitude decays monotonically in
    /// the long run.  PointerTrack closes a fixed fraction of the gap to the
    /// target angle (exponential smoothing); the applied delta is recorded as
    /// the angular velocity so a later free swing picks up smoothly.  Idle
    /// leaves everything untouched.
    pub fn step(&mut self, config: &SimConfig) {
        match self.mode {
            SwingMode::FreeSwing => {
                self.angular_velocity += self.angle.sin() * config.gravity_const;
                self.angular_velocity *= config.damping;
                self.angle += self.angular_velocity;
            }
            SwingMode::PointerTrack => {
                let delta = (self.track_target - self.angle) * config.track_smoothing;
                self.angle += delta;
                self.angular_velocity = delta;
            }
            SwingMode::Idle => {}
        }
    }

    /// Start or stop the autonomous swing.
    ///
    /// Starting from Idle seeds a small kickoff velocity so the bob visibly
    /// moves instead of balancing at `sin(0) = 0`.  The toggle is ignored
    /// while the pointer holds the bob — pointer control has precedence.
    pub fn toggle_swing(&mut self, config: &SimConfig) {
        match self.mode {
            SwingMode::Idle => {
                self.mode = SwingMode::FreeSwing;
                self.angular_velocity = config.kickoff_speed;
            }
            SwingMode::FreeSwing => {
                self.mode = SwingMode::Idle;
            }
            SwingMode::PointerTrack => {}
        }
    }

    /// Pointer pressed: grab the bob, cancelling any active free swing.
    pub fn pointer_down(&mut self, target_angle: f32) {
        self.mode = SwingMode::PointerTrack;
        self.track_target = target_angle;
    }

    /// Pointer moved: retarget only while tracking; a no-op otherwise.
    pub fn pointer_move(&mut self, target_angle: f32) {
        if self.mode == SwingMode::PointerTrack {
            self.track_target = target_angle;
        }
    }

    /// Pointer released: drop to Idle — never back into FreeSwing.
    pub fn pointer_up(&mut self) {
        if self.mode == SwingMode::PointerTrack {
            self.mode = SwingMode::Idle;
        }
    }

    /// Return to the fixed initial state from any mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One integration tick per `Update` frame, mirroring the one-step-per-
/// animation-frame loop this toy is built around.
pub fn pendulum_step_system(mut pendulum: ResMut<Pendulum>, config: Res<SimConfig>) {
    pendulum.step(&config);
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the resources and the ordered input → integrate → trail chain.
pub struct PendulumPlugin;

impl Plugin for PendulumPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Pendulum>()
            .init_resource::<Pivot>()
            .init_resource::<crate::theme::EffectsConfig>()
            .init_resource::<crate::trail::TrailBuffer>()
            .init_resource::<crate::input::ControlIntent>()
            .add_systems(
                Update,
                (
                    crate::input::intent_clear_system,
                    crate::input::keyboard_to_intent_system,
                    crate::input::mouse_to_intent_system,
                    crate::input::apply_intent_system,
                    pendulum_step_system,
                    crate::trail::trail_update_system,
                )
                    .chain(),
            )
            .add_systems(Update, crate::input::window_resize_system);
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
