//! The per-frame simulation loop.
//!
//! One player, one level, synchronous single-threaded execution: each
//! tick drains the input store, runs the sub-stepped physics to
//! completion, and leaves the camera pose ready for the render pass.
//! Geometry may arrive at any point after construction; until it does the
//! player simply free-falls.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_physics::{ConfigError, ControllerConfig, Triangle};

use crate::input::InputState;
use crate::level::{Level, LevelGeometry};
use crate::player::{CameraPose, Player};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ticks per second when driven by a fixed timer.
    pub tick_rate: u32,

    /// Movement physics configuration.
    pub movement: ControllerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            movement: ControllerConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Time step per tick, seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The running simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    /// Configuration in effect.
    pub config: SimulationConfig,

    /// Raw input store, written by the host's event loop.
    pub input: InputState,

    /// The player.
    pub player: Player,

    geometry: LevelGeometry,
}

impl Simulation {
    /// Create a simulation with the player at `spawn`; collision geometry
    /// arrives later via [`Simulation::load_geometry`].
    pub fn new(config: SimulationConfig, spawn: Vec3) -> Result<Self, ConfigError> {
        let player = Player::new(config.movement.clone(), spawn)?;
        Ok(Self {
            frame: 0,
            config,
            input: InputState::new(),
            player,
            geometry: LevelGeometry::default(),
        })
    }

    /// Create a simulation from a fully loaded level: geometry is indexed
    /// immediately and the player starts at the level's first spawn point.
    pub fn from_level(config: SimulationConfig, level: Level) -> Result<Self, ConfigError> {
        let spawn = level.player_spawn().copied();
        let mut sim = Self::new(config, spawn.map_or(Vec3::ZERO, |s| s.position))?;
        if let Some(s) = spawn {
            sim.player.state.yaw = s.facing;
        }
        sim.load_geometry(level.triangles);
        Ok(sim)
    }

    /// Deliver the finalized triangle set. Effective once; later calls
    /// are ignored.
    pub fn load_geometry(&mut self, triangles: Vec<Triangle>) {
        self.geometry.finish(triangles);
    }

    /// Whether collision geometry has been delivered.
    pub fn geometry_ready(&self) -> bool {
        self.geometry.is_ready()
    }

    /// Advance one tick at the configured fixed rate.
    pub fn tick(&mut self) {
        self.advance(self.config.delta_time());
    }

    /// Advance by an externally measured frame time (seconds).
    pub fn advance(&mut self, frame_dt: f32) {
        self.player.update(&mut self.input, &self.geometry, frame_dt);
        self.frame += 1;
    }

    /// The camera pose produced by the last tick.
    pub fn camera_pose(&self) -> CameraPose {
        self.player.camera_pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_sim() -> Simulation {
        Simulation::from_level(SimulationConfig::default(), Level::test_arena()).unwrap()
    }

    #[test]
    fn test_creation_without_geometry() {
        let sim = Simulation::new(SimulationConfig::default(), Vec3::new(0.0, 5.0, 0.0)).unwrap();
        assert_eq!(sim.frame, 0);
        assert!(!sim.geometry_ready());
    }

    #[test]
    fn test_free_fall_until_geometry_arrives() {
        let mut sim = Simulation::new(SimulationConfig::default(), Vec3::new(0.0, 3.0, 0.0)).unwrap();

        for _ in 0..10 {
            sim.tick();
        }
        assert!(!sim.player.on_floor(), "nothing to stand on yet");
        let falling_y = sim.camera_pose().position.y;

        // Deliver the floor; the player lands on the next frames.
        sim.load_geometry(Level::test_arena().triangles);
        for _ in 0..600 {
            sim.tick();
        }
        assert!(sim.player.on_floor(), "should land once geometry is in");
        assert!(sim.camera_pose().position.y < falling_y);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = arena_sim();
        sim.tick();
        sim.tick();
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_movement_input_moves_player() {
        let mut sim = arena_sim();
        // Settle onto the floor first.
        for _ in 0..120 {
            sim.tick();
        }
        let start = sim.player.position();

        sim.input.movement.forward = true;
        for _ in 0..60 {
            sim.tick();
        }

        let distance = (sim.player.position() - start).length();
        assert!(distance > 1.0, "player should have moved, distance={}", distance);
    }

    #[test]
    fn test_spawn_faces_level_direction() {
        let mut level = Level::test_arena();
        level.spawn_points[0].facing = 1.25;
        let sim = Simulation::from_level(SimulationConfig::default(), level).unwrap();
        assert!((sim.camera_pose().yaw - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        // Identical input sequences must produce identical trajectories.
        let run = || {
            let mut sim = arena_sim();
            for i in 0..200u32 {
                sim.input.movement.forward = i % 2 == 0;
                sim.input.movement.right = i % 3 == 0;
                sim.input.actions.jump = i % 50 == 10;
                sim.input.accumulate_mouse((i % 7) as f32 - 3.0, 0.5);
                sim.tick();
            }
            sim.camera_pose()
        };

        let a = run();
        let b = run();
        assert_eq!(a, b, "simulation should be deterministic");
    }

    #[test]
    fn test_camera_pose_matches_eye() {
        let sim = arena_sim();
        let pose = sim.camera_pose();
        assert_eq!(pose.position, sim.player.state.capsule.end);
    }
}
