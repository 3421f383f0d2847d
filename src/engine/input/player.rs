// Pressed/just-pressed action state for the player

use super::action::Action;
use std::collections::HashSet;

/// Action state for the player, rebuilt frame by frame from input events
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.contains(&action) {
            self.just_released.insert(action);
            self.pressed.remove(&action);
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after processing all events
    pub(crate) fn update(&mut self) {
        // Clear frame-specific state
        self.just_pressed.clear();
        self.just_released.clear();

        // Save current pressed state for next frame
        self.previous_pressed = self.pressed.clone();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }

    /// Get all currently pressed actions
    pub fn get_pressed_actions(&self) -> Vec<Action> {
        self.pressed.iter().copied().collect()
    }

    /// Get horizontal movement input (-1.0 to 1.0)
    pub fn horizontal_axis(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}
