//! Movement configuration constants.
//!
//! All tuning parameters are grouped here. Values are validated when the
//! controller is constructed; nothing is clamped silently at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the character controller.
///
/// Metric units (meters, seconds, radians) throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // ========================================================================
    // Player Volume
    // ========================================================================
    /// Capsule radius (meters).
    pub capsule_radius: f32,

    /// Length of the capsule's core segment, foot end to eye end (meters).
    pub capsule_length: f32,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Acceleration while standing on a floor (meters/second²).
    pub ground_acceleration: f32,

    /// Acceleration while airborne (meters/second²). Much lower than on
    /// the ground so air control stays limited.
    pub air_acceleration: f32,

    /// Speed factor applied on top of the acceleration while the sprint
    /// action is held. `1.0` disables sprinting.
    pub sprint_multiplier: f32,

    // ========================================================================
    // Physics
    // ========================================================================
    /// Downward acceleration while airborne (meters/second²).
    pub gravity: f32,

    /// Vertical velocity set by a jump (meters/second).
    pub jump_speed: f32,

    /// Exponential velocity decay rate; the per-step factor is
    /// `exp(-damping * dt)`.
    pub damping: f32,

    /// Fraction of the damping applied while airborne, so momentum carries
    /// through jumps.
    pub air_drag: f32,

    /// Number of fixed sub-steps a frame is divided into. Each sub-step
    /// runs its own collision pass, which is what keeps fast movement from
    /// tunneling through thin geometry.
    pub sub_steps: u32,

    /// Minimum contact normal Y for a surface to count as floor
    /// (cosine of the maximum walkable slope; 0.7 is roughly 45 degrees).
    pub min_floor_normal_y: f32,

    // ========================================================================
    // Look
    // ========================================================================
    /// Mouse sensitivity (radians per pixel of mouse movement).
    pub mouse_sensitivity: f32,

    /// Lowest allowed pitch (radians, negative looks down).
    pub min_pitch: f32,

    /// Highest allowed pitch (radians, positive looks up).
    pub max_pitch: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            capsule_radius: 0.35,
            capsule_length: 0.65,

            ground_acceleration: 25.0,
            air_acceleration: 8.0,
            sprint_multiplier: 1.8,

            gravity: 30.0,
            jump_speed: 15.0,
            damping: 4.0,
            air_drag: 0.1,
            sub_steps: 5,
            min_floor_normal_y: 0.7,

            mouse_sensitivity: 0.002,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

impl ControllerConfig {
    /// Check every field, failing fast on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.capsule_radius.is_finite() && self.capsule_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.capsule_radius));
        }
        if !(self.capsule_length.is_finite() && self.capsule_length > 0.0) {
            return Err(ConfigError::InvalidSegmentLength(self.capsule_length));
        }
        if self.sub_steps == 0 {
            return Err(ConfigError::ZeroSubSteps);
        }

        for (name, value) in [
            ("ground_acceleration", self.ground_acceleration),
            ("air_acceleration", self.air_acceleration),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("damping", self.damping),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }
        if !(self.sprint_multiplier.is_finite() && self.sprint_multiplier >= 1.0) {
            return Err(ConfigError::InvalidConstant {
                name: "sprint_multiplier",
                value: self.sprint_multiplier,
            });
        }
        if !(self.air_drag.is_finite() && self.air_drag > 0.0 && self.air_drag <= 1.0) {
            return Err(ConfigError::InvalidConstant {
                name: "air_drag",
                value: self.air_drag,
            });
        }
        if !(self.min_floor_normal_y.is_finite()
            && self.min_floor_normal_y > 0.0
            && self.min_floor_normal_y <= 1.0)
        {
            return Err(ConfigError::InvalidConstant {
                name: "min_floor_normal_y",
                value: self.min_floor_normal_y,
            });
        }
        if !(self.min_pitch.is_finite() && self.max_pitch.is_finite())
            || self.min_pitch >= self.max_pitch
        {
            return Err(ConfigError::InvertedPitchLimits {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }

        Ok(())
    }

    /// Total height of the capsule volume, caps included.
    pub fn capsule_height(&self) -> f32 {
        self.capsule_length + 2.0 * self.capsule_radius
    }
}
