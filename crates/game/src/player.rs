//! The player entity and its camera pose.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_physics::{
    CharacterController, ConfigError, ControllerConfig, PlayerState,
};

use crate::input::InputState;
use crate::level::LevelGeometry;

/// The camera pose published after integration.
///
/// This is the core's only per-frame output: the external renderer reads
/// it, nothing ever writes it back into the physics state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position (the capsule's upper end point).
    pub position: Vec3,
    /// Look yaw, radians.
    pub yaw: f32,
    /// Look pitch, radians.
    pub pitch: f32,
}

/// The player: kinematic state plus the controller that advances it.
#[derive(Debug)]
pub struct Player {
    /// Kinematic state, mutated in place every frame.
    pub state: PlayerState,

    controller: CharacterController,
}

impl Player {
    /// Create a player standing at `spawn` (feet position).
    ///
    /// Fails fast on an invalid movement configuration.
    pub fn new(config: ControllerConfig, spawn: Vec3) -> Result<Self, ConfigError> {
        let controller = CharacterController::new(config)?;
        let state = PlayerState::spawn(controller.config(), spawn);
        Ok(Self { state, controller })
    }

    /// Advance one frame: drain `input` into a command and integrate
    /// against the level geometry (or free-fall while it is loading).
    pub fn update(&mut self, input: &mut InputState, geometry: &LevelGeometry, frame_dt: f32) {
        let command = input.to_command(self.controller.config().mouse_sensitivity);
        self.controller
            .update(&mut self.state, &command, geometry.index(), frame_dt);
    }

    /// The pose the camera should adopt for this frame.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose {
            position: self.state.eye_position(),
            yaw: self.state.yaw,
            pitch: self.state.pitch,
        }
    }

    /// The movement configuration in effect.
    pub fn config(&self) -> &ControllerConfig {
        self.controller.config()
    }

    /// Feet position in world space.
    pub fn position(&self) -> Vec3 {
        self.state.capsule.start - Vec3::Y * self.state.capsule.radius
    }

    /// Whether the player is standing on a floor.
    #[inline]
    pub fn on_floor(&self) -> bool {
        self.state.on_floor
    }

    /// Whether fly mode is active.
    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state.flying
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(ControllerConfig::default(), Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert!((player.position() - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
        assert!(!player.on_floor());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ControllerConfig {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(Player::new(config, Vec3::ZERO).is_err());
    }

    #[test]
    fn test_camera_pose_tracks_capsule_end() {
        let mut player = Player::new(ControllerConfig::default(), Vec3::new(1.0, 5.0, -2.0)).unwrap();
        player.state.yaw = 0.5;
        player.state.pitch = -0.25;

        let pose = player.camera_pose();
        assert_eq!(pose.position, player.state.capsule.end);
        assert_eq!(pose.yaw, 0.5);
        assert_eq!(pose.pitch, -0.25);
    }

    #[test]
    fn test_update_free_falls_while_loading() {
        let mut player = Player::new(ControllerConfig::default(), Vec3::new(0.0, 10.0, 0.0)).unwrap();
        let mut input = InputState::new();
        let geometry = LevelGeometry::default();

        let start = player.camera_pose().position;
        for _ in 0..30 {
            player.update(&mut input, &geometry, 1.0 / 60.0);
        }

        assert!(player.camera_pose().position.y < start.y, "should fall while geometry loads");
        assert!(!player.on_floor());
    }
}
