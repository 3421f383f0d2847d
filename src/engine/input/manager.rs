// Input manager - event processing and the player-input gate

use super::action::{self, Action, InputSource};
use super::player::PlayerInput;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Routes window events to action state and owns the player-input gate.
///
/// While player input is disabled, gameplay actions are dropped at the event
/// boundary and the held state is cleared, so nothing downstream has to
/// re-check the gate. Meta actions (menu) always pass.
pub struct InputManager {
    /// Input source to action mapping
    bindings: HashMap<InputSource, Action>,

    /// Current action state
    player: PlayerInput,

    /// Gate for gameplay actions
    player_input_enabled: bool,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        for (source, action) in action::default_bindings()
            .into_iter()
            .chain(action::global_bindings())
        {
            bindings.insert(source, action);
        }

        Self {
            bindings,
            player: PlayerInput::new(),
            player_input_enabled: true,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            match event.state {
                ElementState::Pressed => {
                    if !event.repeat {
                        // Only register if not a key repeat
                        self.press_source(source);
                    }
                }
                ElementState::Released => self.release_source(source),
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        match state {
            ElementState::Pressed => self.press_source(source),
            ElementState::Released => self.release_source(source),
        }
    }

    fn press_source(&mut self, source: InputSource) {
        if let Some(&action) = self.bindings.get(&source) {
            if action.is_gameplay() && !self.player_input_enabled {
                return;
            }
            self.player.press(action);
        }
    }

    fn release_source(&mut self, source: InputSource) {
        if let Some(&action) = self.bindings.get(&source) {
            // Releases always go through so no action can stick
            self.player.release(action);
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after processing all events
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Get the current action state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get mutable action state (bypasses the gate; used for test drivers)
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Stop routing gameplay actions and clear any held state
    pub fn disable_player_input(&mut self) {
        if self.player_input_enabled {
            self.player_input_enabled = false;
            self.player.reset();
            log::debug!("Player input disabled");
        }
    }

    /// Resume routing gameplay actions
    pub fn enable_player_input(&mut self) {
        if !self.player_input_enabled {
            self.player_input_enabled = true;
            log::debug!("Player input enabled");
        }
    }

    /// Check whether gameplay actions are currently routed
    pub fn is_player_input_enabled(&self) -> bool {
        self.player_input_enabled
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn press_key(manager: &mut InputManager, code: KeyCode) {
        manager.press_source(InputSource::key(code));
    }

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new();
        assert!(manager.is_player_input_enabled());
        assert!(!manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_bound_key_press() {
        let mut manager = InputManager::new();
        press_key(&mut manager, KeyCode::Space);
        assert!(manager.player().is_pressed(Action::Jump));
        assert!(manager.player().just_pressed(Action::Jump));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::new();
        press_key(&mut manager, KeyCode::KeyZ);
        assert!(manager.player().get_pressed_actions().is_empty());
    }

    #[test]
    fn test_mouse_attack_binding() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(manager.player().is_pressed(Action::Attack));

        manager.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!manager.player().is_pressed(Action::Attack));
    }

    #[test]
    fn test_disable_drops_gameplay_actions() {
        let mut manager = InputManager::new();
        manager.disable_player_input();

        press_key(&mut manager, KeyCode::KeyD);
        press_key(&mut manager, KeyCode::Space);

        assert!(!manager.player().is_pressed(Action::MoveRight));
        assert!(!manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_disable_clears_held_state() {
        let mut manager = InputManager::new();
        press_key(&mut manager, KeyCode::KeyD);
        assert!(manager.player().is_pressed(Action::MoveRight));

        manager.disable_player_input();
        assert!(!manager.player().is_pressed(Action::MoveRight));
        assert_eq!(manager.player().horizontal_axis(), 0.0);
    }

    #[test]
    fn test_meta_actions_pass_while_disabled() {
        let mut manager = InputManager::new();
        manager.disable_player_input();

        press_key(&mut manager, KeyCode::Escape);
        assert!(manager.player().is_pressed(Action::Menu));
    }

    #[test]
    fn test_reenable_allows_new_presses() {
        let mut manager = InputManager::new();
        manager.disable_player_input();
        press_key(&mut manager, KeyCode::Space);
        assert!(!manager.player().is_pressed(Action::Jump));

        manager.enable_player_input();
        press_key(&mut manager, KeyCode::Space);
        assert!(manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_disable_twice_is_idempotent() {
        let mut manager = InputManager::new();
        manager.disable_player_input();
        manager.disable_player_input();
        assert!(!manager.is_player_input_enabled());

        manager.enable_player_input();
        assert!(manager.is_player_input_enabled());
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::new();
        press_key(&mut manager, KeyCode::Space);
        assert!(manager.player().just_pressed(Action::Jump));

        manager.update();
        assert!(!manager.player().just_pressed(Action::Jump));
        assert!(manager.player().is_pressed(Action::Jump));
    }
}
