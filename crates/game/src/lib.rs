//! Vantage Game Layer
//!
//! Ties the physics core to the outside world:
//!
//! - Raw input collection and conversion to physics commands
//! - Level geometry construction and the loading handoff
//! - The player entity and its published camera pose
//! - The per-frame simulation loop
//!
//! # Architecture
//!
//! ```text
//! host events ──► InputState ──► PlayerCommand ─┐
//!                                               ▼
//! triangle soup ──► LevelGeometry ──► CharacterController ──► CameraPose
//!                   (one-shot)        (5 sub-steps/frame)     (renderer)
//! ```
//!
//! The simulation is deterministic: the same input sequence against the
//! same level always produces the same trajectory.

pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

pub use input::InputState;
pub use level::{Level, LevelGeometry, SpawnPoint};
pub use player::{CameraPose, Player};
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use vantage_physics::{
    Capsule, CharacterController, ConfigError, ControllerConfig, PlayerCommand, PlayerState,
    Triangle, TriangleIndex,
};
