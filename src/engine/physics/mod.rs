// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::CollisionEvent;
pub use world::PhysicsWorld;

// Re-export for collider construction outside the presets
#[allow(unused_imports)]
pub use collision::CollisionGroups;

// Re-export commonly used rapier types for convenience
#[allow(unused_imports)]
pub use rapier2d::prelude::{QueryFilter, Real, RigidBodyType, Vector};
