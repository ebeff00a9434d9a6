//! Player movement physics.
//!
//! Movement runs in fixed sub-steps: each display frame's elapsed time is
//! split into equal slices, and every slice applies input forces, gravity
//! and damping, integrates the capsule, and resolves penetration against
//! the world. The controller supports two kinematic modes:
//!
//! - **grounded**: gravity, jumping and floor detection
//! - **flying**: a global toggle; vertical movement comes from input and
//!   gravity is inert
//!
//! All movement is deterministic: the same state, commands and geometry
//! always produce the same result.

mod config;
mod controller;
mod state;

pub use config::ControllerConfig;
pub use controller::CharacterController;
pub use state::{CommandButtons, PlayerCommand, PlayerState};
