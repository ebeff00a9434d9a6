//! Player input handling.
//!
//! [`InputState`] is a plain data store: the host's event loop sets held
//! keys and accumulates mouse movement, and once per frame the store is
//! converted into a physics [`PlayerCommand`]. Conversion drains the
//! accumulated mouse delta and the fly-toggle latch, so each is consumed
//! exactly once.

use serde::{Deserialize, Serialize};
use vantage_physics::{CommandButtons, PlayerCommand};

/// Held movement keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Held action keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionKeys {
    pub jump: bool,
    pub sprint: bool,
    /// Fly-mode vertical movement.
    pub ascend: bool,
    pub descend: bool,
}

/// Raw input state collected between frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Currently held movement keys.
    pub movement: MovementKeys,

    /// Currently held action keys.
    pub actions: ActionKeys,

    /// Mouse movement accumulated since the last conversion (pixels).
    mouse_delta: (f32, f32),

    /// Pending one-shot fly toggle.
    fly_toggle: bool,

    /// Whether the host window owns the pointer. While unfocused, input
    /// is ignored so keys cannot stick across a focus change.
    focused: bool,
}

impl InputState {
    /// A fresh, focused input store with nothing held.
    pub fn new() -> Self {
        Self {
            focused: true,
            ..Default::default()
        }
    }

    /// Accumulate raw mouse movement. Ignored while unfocused.
    pub fn accumulate_mouse(&mut self, dx: f32, dy: f32) {
        if !self.focused {
            return;
        }
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Latch a fly-mode toggle for the next conversion.
    pub fn queue_fly_toggle(&mut self) {
        if self.focused {
            self.fly_toggle = true;
        }
    }

    /// Update pointer focus. Losing focus clears every held key and any
    /// accumulated deltas.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.movement = MovementKeys::default();
            self.actions = ActionKeys::default();
            self.mouse_delta = (0.0, 0.0);
            self.fly_toggle = false;
        }
    }

    /// Whether the host window currently owns the pointer.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Convert to a physics command, draining the mouse delta and the
    /// fly-toggle latch.
    ///
    /// # Arguments
    ///
    /// * `mouse_sensitivity` - Radians of view rotation per pixel
    pub fn to_command(&mut self, mouse_sensitivity: f32) -> PlayerCommand {
        let mut cmd = PlayerCommand::default();

        if self.movement.forward {
            cmd.forward_move += 1.0;
        }
        if self.movement.backward {
            cmd.forward_move -= 1.0;
        }
        if self.movement.right {
            cmd.right_move += 1.0;
        }
        if self.movement.left {
            cmd.right_move -= 1.0;
        }
        if self.actions.ascend {
            cmd.climb_move += 1.0;
        }
        if self.actions.descend {
            cmd.climb_move -= 1.0;
        }

        // Normalise so diagonal movement is no faster than straight.
        let magnitude = (cmd.forward_move.powi(2) + cmd.right_move.powi(2)).sqrt();
        if magnitude > 1.0 {
            cmd.forward_move /= magnitude;
            cmd.right_move /= magnitude;
        }

        // Mouse up (negative dy) looks up; mouse right turns right.
        let (dx, dy) = std::mem::take(&mut self.mouse_delta);
        cmd.view_delta = (-dy * mouse_sensitivity, dx * mouse_sensitivity);

        if self.actions.jump {
            cmd.buttons.press(CommandButtons::JUMP);
        }
        if self.actions.sprint {
            cmd.buttons.press(CommandButtons::SPRINT);
        }
        if std::mem::take(&mut self.fly_toggle) {
            cmd.buttons.press(CommandButtons::TOGGLE_FLY);
        }

        cmd
    }

    /// Whether any movement key is held.
    pub fn has_movement(&self) -> bool {
        self.movement.forward || self.movement.backward || self.movement.left || self.movement.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_movement_is_normalised() {
        let mut input = InputState::new();
        input.movement.forward = true;
        input.movement.right = true;

        let cmd = input.to_command(1.0);
        let magnitude = (cmd.forward_move.powi(2) + cmd.right_move.powi(2)).sqrt();
        assert!((magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_straight_movement_not_scaled() {
        let mut input = InputState::new();
        input.movement.forward = true;

        let cmd = input.to_command(1.0);
        assert_eq!(cmd.forward_move, 1.0);
        assert_eq!(cmd.right_move, 0.0);
    }

    #[test]
    fn test_mouse_delta_is_drained() {
        let mut input = InputState::new();
        input.accumulate_mouse(10.0, -4.0);
        input.accumulate_mouse(5.0, 0.0);

        let cmd = input.to_command(0.1);
        assert!((cmd.view_delta.1 - 1.5).abs() < 1e-6, "yaw from 15px right");
        assert!((cmd.view_delta.0 - 0.4).abs() < 1e-6, "pitch from 4px up");

        // Drained: a second conversion sees nothing.
        let cmd = input.to_command(0.1);
        assert_eq!(cmd.view_delta, (0.0, 0.0));
    }

    #[test]
    fn test_fly_toggle_is_one_shot() {
        let mut input = InputState::new();
        input.queue_fly_toggle();

        let cmd = input.to_command(1.0);
        assert!(cmd.wants_fly_toggle());

        let cmd = input.to_command(1.0);
        assert!(!cmd.wants_fly_toggle());
    }

    #[test]
    fn test_losing_focus_clears_everything() {
        let mut input = InputState::new();
        input.movement.forward = true;
        input.actions.jump = true;
        input.accumulate_mouse(100.0, 100.0);
        input.queue_fly_toggle();

        input.set_focused(false);
        let cmd = input.to_command(1.0);
        assert_eq!(cmd.forward_move, 0.0);
        assert!(!cmd.wants_jump());
        assert!(!cmd.wants_fly_toggle());
        assert_eq!(cmd.view_delta, (0.0, 0.0));

        // Events while unfocused are ignored.
        input.accumulate_mouse(50.0, 0.0);
        input.queue_fly_toggle();
        let cmd = input.to_command(1.0);
        assert_eq!(cmd.view_delta, (0.0, 0.0));
        assert!(!cmd.wants_fly_toggle());
    }

    #[test]
    fn test_action_buttons_map_through() {
        let mut input = InputState::new();
        input.actions.jump = true;
        input.actions.sprint = true;

        let cmd = input.to_command(1.0);
        assert!(cmd.wants_jump());
        assert!(cmd.wants_sprint());
    }
}
