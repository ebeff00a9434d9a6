//! Vantage Physics
//!
//! Capsule-vs-triangle collision and first-person movement for the
//! Vantage walker. The crate owns the hard part of the player loop: a
//! static spatial index over arbitrary triangle geometry, a capsule
//! collision volume, and a fixed-sub-step integrator that resolves
//! interpenetration every step without tunneling or jitter.
//!
//! # Architecture
//!
//! Two halves, mirrored by the module tree:
//!
//! - **Collision**: [`TriangleIndex`] (broad-phase), [`Capsule`] and
//!   [`intersect_capsule`] (narrow-phase) producing [`Contact`]s
//! - **Movement**: [`CharacterController`] advancing a [`PlayerState`]
//!   from per-frame [`PlayerCommand`]s
//!
//! Everything upstream (windowing, rendering, asset loading) supplies a
//! triangle soup once and reads the resulting pose each frame; nothing in
//! this crate blocks, allocates per sub-step beyond the candidate list, or
//! fails after construction.
//!
//! # Design Principles
//!
//! 1. **Determinism**: same inputs, same outputs, every platform
//! 2. **Fail fast**: bad configuration is rejected at construction, never
//!    clamped at runtime
//! 3. **Bounded frames**: a frame's physics always completes; there is no
//!    mid-integration cancellation

pub mod collision;
pub mod error;
pub mod movement;
pub mod random;

pub use collision::{intersect_capsule, Aabb, Capsule, Contact, Triangle, TriangleIndex};
pub use error::ConfigError;
pub use movement::{
    CharacterController, CommandButtons, ControllerConfig, PlayerCommand, PlayerState,
};
pub use random::SeededRandom;
