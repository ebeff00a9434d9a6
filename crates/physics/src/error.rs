//! Configuration errors reported at construction time.
//!
//! The running physics loop never fails; everything that can be wrong is
//! rejected up front when a collider or controller is built.

use thiserror::Error;

/// Invalid configuration detected while constructing a collider or
/// controller. Values are never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Capsule radius must be positive and finite.
    #[error("capsule radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Capsule segment length must be positive and finite.
    #[error("capsule segment length must be positive and finite, got {0}")]
    InvalidSegmentLength(f32),

    /// The integrator needs at least one sub-step per frame.
    #[error("sub-step count must be at least 1")]
    ZeroSubSteps,

    /// A tuning constant is zero, negative, NaN or infinite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidConstant {
        /// Name of the offending configuration field.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Pitch limits must satisfy `min < max`.
    #[error("pitch limits are inverted: min {min} >= max {max}")]
    InvertedPitchLimits {
        /// Configured minimum pitch (radians).
        min: f32,
        /// Configured maximum pitch (radians).
        max: f32,
    },
}
