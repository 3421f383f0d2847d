// Checkpoint registry - where the player comes back after dying

use glam::Vec2;
use log::info;

/// Unique identifier for a checkpoint
pub type CheckpointId = u32;

/// A registered respawn position
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub position: Vec2,
}

/// Capability for answering "where does the player respawn?"
///
/// The death cycle depends on this trait, not on [`CheckpointManager`], so
/// tests can hand it a fixed position.
pub trait CheckpointProvider {
    fn current_checkpoint(&self) -> Vec2;
}

/// Ordered registry of checkpoints with one currently active
#[derive(Debug)]
pub struct CheckpointManager {
    checkpoints: Vec<Checkpoint>,
    current: usize,
}

impl CheckpointManager {
    /// Create a registry whose first checkpoint is the level spawn point
    pub fn new(spawn: Vec2) -> Self {
        Self {
            checkpoints: vec![Checkpoint {
                id: 0,
                position: spawn,
            }],
            current: 0,
        }
    }

    /// Register a new checkpoint and return its id
    pub fn register(&mut self, position: Vec2) -> CheckpointId {
        let id = self.checkpoints.len() as CheckpointId;
        self.checkpoints.push(Checkpoint { id, position });
        id
    }

    /// Make a checkpoint the active respawn target.
    /// Returns true only when this changed the active checkpoint.
    pub fn activate(&mut self, id: CheckpointId) -> bool {
        let Some(index) = self.checkpoints.iter().position(|c| c.id == id) else {
            return false;
        };
        if index == self.current {
            return false;
        }

        self.current = index;
        info!(
            "Checkpoint {} activated at ({:.1}, {:.1})",
            id, self.checkpoints[index].position.x, self.checkpoints[index].position.y
        );
        true
    }

    /// The currently active checkpoint
    pub fn current(&self) -> &Checkpoint {
        &self.checkpoints[self.current]
    }

    /// Number of registered checkpoints
    pub fn count(&self) -> usize {
        self.checkpoints.len()
    }
}

impl CheckpointProvider for CheckpointManager {
    fn current_checkpoint(&self) -> Vec2 {
        self.current().position
    }
}
