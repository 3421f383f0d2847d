// Input handling system
//
// Maps keyboard and mouse input to game actions for a single player, and
// exposes a gate that gameplay code can close while the player is not in
// control (death, cutscenes).
//
// ## Architecture
//
// - `action`: Defines game actions and default bindings
// - `player`: Pressed/just-pressed/just-released action state
// - `manager`: Event processing and the player-input gate

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use player::PlayerInput;
