// Game modules: player systems, checkpoints, UI overlays, world wiring

pub mod checkpoints;
pub mod player;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use player::PlayerStats;
pub use world::GameWorld;
