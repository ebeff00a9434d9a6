//! The fixed-sub-step character controller.
//!
//! This is the main entry point for player movement. Once per frame it
//! takes the frame's input command and elapsed time, splits the time into
//! equal sub-steps and, for each sub-step, applies input forces, gravity
//! and damping, integrates the capsule, and resolves penetration against
//! the triangle index.
//!
//! Sub-stepping bounds how far the capsule travels between collision
//! passes, which is what prevents tunneling through thin geometry at high
//! speed.

use crate::collision::{intersect_capsule, TriangleIndex};
use crate::error::ConfigError;

use super::config::ControllerConfig;
use super::state::{PlayerCommand, PlayerState};

/// Frame times above this are clamped so a long hitch cannot explode the
/// integration.
const MAX_FRAME_TIME: f32 = 0.1;

/// First-person character controller.
///
/// Stateless between frames beyond what lives in [`PlayerState`]; the
/// controller itself only carries configuration.
///
/// # Example
///
/// ```ignore
/// let controller = CharacterController::new(ControllerConfig::default())?;
/// let mut state = PlayerState::spawn(controller.config(), spawn_point);
///
/// // Each frame:
/// controller.update(&mut state, &command, geometry.index(), delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: ControllerConfig,
}

impl CharacterController {
    /// Create a controller, validating the configuration up front.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Advance the player by one frame.
    ///
    /// `geometry` is `None` while the level is still loading; the player
    /// then free-falls, which is expected rather than an error. The whole
    /// frame's physics completes within this call; there are no suspension
    /// points.
    ///
    /// # Arguments
    ///
    /// * `state` - The player's kinematic state (mutated in place)
    /// * `command` - This frame's input snapshot
    /// * `geometry` - The collision index, once loaded
    /// * `frame_dt` - Elapsed time since the previous frame, seconds
    pub fn update(
        &self,
        state: &mut PlayerState,
        command: &PlayerCommand,
        geometry: Option<&TriangleIndex>,
        frame_dt: f32,
    ) {
        if frame_dt <= 0.0 {
            return;
        }
        let frame_dt = frame_dt.min(MAX_FRAME_TIME);

        // Mouse-look is decoupled from the sub-stepped physics and applies
        // immediately.
        self.apply_look(state, command);

        if command.wants_fly_toggle() {
            state.flying = !state.flying;
            log::debug!("fly mode toggled: {}", state.flying);
        }

        let dt = frame_dt / self.config.sub_steps as f32;
        for _ in 0..self.config.sub_steps {
            self.apply_input_forces(state, command, dt);
            self.apply_gravity(state, dt);
            self.apply_damping(state, dt);
            state.capsule.translate(state.velocity * dt);
            self.resolve_collisions(state, geometry);
        }
    }

    fn apply_look(&self, state: &mut PlayerState, command: &PlayerCommand) {
        state.pitch = (state.pitch + command.view_delta.0)
            .clamp(self.config.min_pitch, self.config.max_pitch);

        state.yaw += command.view_delta.1;
        while state.yaw > std::f32::consts::PI {
            state.yaw -= std::f32::consts::TAU;
        }
        while state.yaw < -std::f32::consts::PI {
            state.yaw += std::f32::consts::TAU;
        }
    }

    fn apply_input_forces(&self, state: &mut PlayerState, command: &PlayerCommand, dt: f32) {
        let acceleration = if state.flying || state.on_floor {
            self.config.ground_acceleration
        } else {
            self.config.air_acceleration
        };
        let sprint = if command.wants_sprint() {
            self.config.sprint_multiplier
        } else {
            1.0
        };
        let speed_delta = acceleration * sprint * dt;

        let forward = state.forward_direction();
        let right = state.right_direction();
        state.velocity += forward * (command.forward_move * speed_delta)
            + right * (command.right_move * speed_delta);

        if state.flying {
            state.velocity.y += command.climb_move * speed_delta;
        } else if command.wants_jump() && state.on_floor {
            // Only honored while grounded; going airborne clears on_floor,
            // so holding jump cannot re-trigger mid-air.
            state.velocity.y = self.config.jump_speed;
        }
    }

    fn apply_gravity(&self, state: &mut PlayerState, dt: f32) {
        if !state.on_floor && !state.flying {
            state.velocity.y -= self.config.gravity * dt;
        }
    }

    fn apply_damping(&self, state: &mut PlayerState, dt: f32) {
        // Multiplicative decay: the factor is in (-1, 0], so velocity
        // shrinks toward zero and never flips sign.
        let mut factor = (-self.config.damping * dt).exp() - 1.0;
        if !state.on_floor && !state.flying {
            factor *= self.config.air_drag;
        }
        state.velocity += state.velocity * factor;
    }

    fn resolve_collisions(&self, state: &mut PlayerState, geometry: Option<&TriangleIndex>) {
        let Some(index) = geometry else {
            state.on_floor = false;
            return;
        };

        match intersect_capsule(&state.capsule, index) {
            None => state.on_floor = false,
            Some(contact) => {
                let floor = contact.is_floor(self.config.min_floor_normal_y);
                state.on_floor = floor;
                if !floor {
                    // Slide: cancel the velocity component into the
                    // surface, keep the tangential part.
                    state.velocity -= contact.normal * contact.normal.dot(state.velocity);
                }
                state.capsule.translate(contact.normal * contact.depth);
            }
        }
    }
}
