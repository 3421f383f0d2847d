// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Combat
    Attack,

    // Meta actions
    Pause,
    Menu,
}

impl Action {
    /// Whether this action drives gameplay (and is therefore blocked while
    /// player input is disabled). Meta actions always pass through.
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, Self::Pause | Self::Menu)
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD plus arrows)
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::KeyW), Action::Jump),
        // Combat
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        (InputSource::key(KeyCode::KeyJ), Action::Attack),
    ]
}

/// Global bindings (never gated by the player-input switch)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        // Note: Pause (P) is handled separately in main.rs to work when game is paused
    ]
}
