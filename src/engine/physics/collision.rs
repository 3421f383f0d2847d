use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// The player needs to stand on platforms, get hurt by hazards, and trip
/// checkpoint sensors; nothing else should interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Static platforms and walls
    Platform = 0b0000_0100,

    /// Hazards that damage the player on contact (spikes, lava)
    Hazard = 0b0000_1000,

    /// Checkpoint trigger zones - don't cause physical collision
    Checkpoint = 0b0001_0000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        // Define what each group can interact with
        let filter = match self {
            // The player touches platforms, hazards, and checkpoint sensors
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32
                    | CollisionGroups::Hazard as u32
                    | CollisionGroups::Checkpoint as u32,
            ),

            // Platforms support the player and stack against each other
            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Platform as u32,
            ),

            // Hazards only care about the player
            CollisionGroups::Hazard => Group::from_bits_truncate(CollisionGroups::Player as u32),

            // Checkpoint sensors only detect the player
            CollisionGroups::Checkpoint => {
                Group::from_bits_truncate(CollisionGroups::Player as u32)
            }

            // Default interacts with everything
            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact forces are not used by any gameplay system
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        // Ensure each group has a unique bit
        let groups = [
            CollisionGroups::Default,
            CollisionGroups::Player,
            CollisionGroups::Platform,
            CollisionGroups::Hazard,
            CollisionGroups::Checkpoint,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *group1 as u32, *group2 as u32,
                        "Groups must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_player_collides_with_hazard() {
        let player_groups = CollisionGroups::Player.to_interaction_groups();
        let hazard_bit = Group::from_bits_truncate(CollisionGroups::Hazard as u32);

        assert!(
            player_groups.filter.contains(hazard_bit),
            "The player must touch hazards to take damage"
        );
    }

    #[test]
    fn test_checkpoint_detects_player_only() {
        let checkpoint_groups = CollisionGroups::Checkpoint.to_interaction_groups();
        let player_bit = Group::from_bits_truncate(CollisionGroups::Player as u32);
        let platform_bit = Group::from_bits_truncate(CollisionGroups::Platform as u32);

        assert!(checkpoint_groups.filter.contains(player_bit));
        assert!(!checkpoint_groups.filter.contains(platform_bit));
    }

    #[test]
    fn test_event_queue_clear() {
        let queue = CollisionEventQueue::new();
        assert!(queue.events().is_empty());
        queue.clear();
        assert!(queue.events().is_empty());
    }
}
