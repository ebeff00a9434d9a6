//! Kinematic state and per-frame input commands.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::Capsule;

use super::config::ControllerConfig;

/// Complete kinematic state for the player.
///
/// One owned struct, passed by exclusive reference through the per-frame
/// update call chain; the controller is its only mutator and the camera
/// binding its only reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// The player's collision volume. Mutated in place every sub-step.
    pub capsule: Capsule,

    /// Velocity in world space (meters/second).
    pub velocity: Vec3,

    /// Whether the last collision pass found a floor contact. Absence of
    /// any contact means airborne, whatever the previous state was.
    pub on_floor: bool,

    /// Global fly toggle; not collision-derived.
    pub flying: bool,

    /// Look yaw in radians; `0` faces +X, increasing turns toward +Z.
    pub yaw: f32,

    /// Look pitch in radians; positive looks up. Clamped by the
    /// controller to the configured range.
    pub pitch: f32,
}

impl PlayerState {
    /// State for a player whose capsule foot end starts at `feet`
    /// (the physical bottom of the volume).
    pub fn spawn(config: &ControllerConfig, feet: Vec3) -> Self {
        let start = feet + Vec3::Y * config.capsule_radius;
        let end = start + Vec3::Y * config.capsule_length;
        Self {
            // Radius comes from a validated config.
            capsule: Capsule {
                start,
                end,
                radius: config.capsule_radius,
            },
            velocity: Vec3::ZERO,
            on_floor: false,
            flying: false,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Whether a jump input would be honored right now.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.on_floor && !self.flying
    }

    /// Horizontal forward direction derived from yaw.
    pub fn forward_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Horizontal right direction derived from yaw.
    pub fn right_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Full look direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }

    /// The capsule's upper end point; this is what the camera tracks.
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.capsule.end
    }

    /// Height of the physical bottom of the capsule volume.
    #[inline]
    pub fn foot_height(&self) -> f32 {
        self.capsule.start.y - self.capsule.radius
    }

    /// Current speed ignoring the vertical component.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Held-action bits for a single frame's command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandButtons(pub u8);

impl CommandButtons {
    /// Jump action.
    pub const JUMP: u8 = 1 << 0;

    /// Sprint modifier.
    pub const SPRINT: u8 = 1 << 1;

    /// One-shot fly-mode toggle.
    pub const TOGGLE_FLY: u8 = 1 << 2;

    /// Check if a button is held.
    #[inline]
    pub fn pressed(self, button: u8) -> bool {
        (self.0 & button) != 0
    }

    /// Press a button.
    #[inline]
    pub fn press(&mut self, button: u8) {
        self.0 |= button;
    }

    /// Release a button.
    #[inline]
    pub fn release(&mut self, button: u8) {
        self.0 &= !button;
    }
}

/// The integrator-facing snapshot of one frame of input.
///
/// Produced by the input layer once per frame; movement axes are already
/// normalised so diagonals are no faster than straight lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerCommand {
    /// Forward/backward axis (-1.0 to 1.0, positive forward).
    pub forward_move: f32,

    /// Strafe axis (-1.0 to 1.0, positive right).
    pub right_move: f32,

    /// Vertical axis used in fly mode (-1.0 to 1.0, positive up).
    pub climb_move: f32,

    /// View angle delta this frame, radians: (pitch, yaw).
    pub view_delta: (f32, f32),

    /// Held-action buttons.
    pub buttons: CommandButtons,
}

impl PlayerCommand {
    /// Whether jump is held.
    #[inline]
    pub fn wants_jump(&self) -> bool {
        self.buttons.pressed(CommandButtons::JUMP)
    }

    /// Whether the sprint modifier is held.
    #[inline]
    pub fn wants_sprint(&self) -> bool {
        self.buttons.pressed(CommandButtons::SPRINT)
    }

    /// Whether fly mode should toggle this frame.
    #[inline]
    pub fn wants_fly_toggle(&self) -> bool {
        self.buttons.pressed(CommandButtons::TOGGLE_FLY)
    }

    /// Whether any movement axis is active.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.forward_move.abs() > 0.01
            || self.right_move.abs() > 0.01
            || self.climb_move.abs() > 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_spawn_places_capsule_on_feet() {
        let config = ControllerConfig::default();
        let state = PlayerState::spawn(&config, Vec3::new(2.0, 10.0, -3.0));

        assert!((state.foot_height() - 10.0).abs() < 1e-6);
        assert!((state.capsule.start.y - 10.35).abs() < 1e-6);
        assert!((state.capsule.end.y - 11.0).abs() < 1e-6);
        assert_eq!(state.velocity, Vec3::ZERO);
        assert!(!state.on_floor);
    }

    #[test]
    fn test_directions_follow_yaw() {
        let config = ControllerConfig::default();
        let mut state = PlayerState::spawn(&config, Vec3::ZERO);

        state.yaw = 0.0;
        assert!((state.forward_direction() - Vec3::X).length() < 1e-6);
        assert!((state.right_direction() - Vec3::Z).length() < 1e-6);

        state.yaw = FRAC_PI_2;
        assert!((state.forward_direction() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_look_direction_pitch() {
        let config = ControllerConfig::default();
        let mut state = PlayerState::spawn(&config, Vec3::ZERO);

        state.pitch = FRAC_PI_2 - 0.01;
        assert!(state.look_direction().y > 0.99, "positive pitch looks up");

        state.pitch = -(FRAC_PI_2 - 0.01);
        assert!(state.look_direction().y < -0.99, "negative pitch looks down");
    }

    #[test]
    fn test_can_jump_requires_floor_and_walk_mode() {
        let config = ControllerConfig::default();
        let mut state = PlayerState::spawn(&config, Vec3::ZERO);
        assert!(!state.can_jump());

        state.on_floor = true;
        assert!(state.can_jump());

        state.flying = true;
        assert!(!state.can_jump());
    }

    #[test]
    fn test_command_buttons() {
        let mut cmd = PlayerCommand::default();
        assert!(!cmd.wants_jump());

        cmd.buttons.press(CommandButtons::JUMP);
        cmd.buttons.press(CommandButtons::SPRINT);
        assert!(cmd.wants_jump());
        assert!(cmd.wants_sprint());

        cmd.buttons.release(CommandButtons::JUMP);
        assert!(!cmd.wants_jump());
        assert!(cmd.wants_sprint());
    }
}
