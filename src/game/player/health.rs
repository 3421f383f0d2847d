// Player health - the death notification source

use crate::engine::events::{EventBus, GameEvent};

/// Hit points with a death notification.
///
/// Reaching zero emits [`GameEvent::PlayerDied`] on the bus. The notification
/// is not guaranteed to fire exactly once per death: damage landing while
/// already at zero re-emits it. Whoever reacts to the event owns the
/// once-per-cycle guarantee.
#[derive(Debug)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Create health at full capacity
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Current hit points
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum hit points
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether hit points are at zero
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Apply damage; emits the death notification when hit points hit zero
    pub fn take_damage(&mut self, amount: i32, bus: &mut EventBus) {
        if amount <= 0 {
            return;
        }

        self.current = (self.current - amount).max(0);
        if self.current == 0 {
            bus.emit(GameEvent::PlayerDied);
        }
    }

    /// Restore hit points, clamped to the maximum
    pub fn heal(&mut self, amount: i32) {
        if amount > 0 {
            self.current = (self.current + amount).min(self.max);
        }
    }

    /// Restore to full health
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
