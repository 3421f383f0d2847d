// In-process event bus for gameplay notifications

use std::collections::VecDeque;

/// Gameplay notifications delivered through the [`EventBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player's health reached zero
    PlayerDied,
    /// The player finished respawning at a checkpoint
    PlayerRespawned,
    /// The player touched a checkpoint sensor
    CheckpointActivated { checkpoint: u32 },
}

/// Identifies a single subscriber on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    queue: VecDeque<GameEvent>,
}

/// Broadcast bus with one pending-event queue per subscriber
///
/// Emitting copies the event into every live subscriber's queue; each
/// subscriber drains its own queue when it gets around to it. Subscriptions
/// are explicit so a component can release its queue on teardown instead of
/// leaking a growing backlog.
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a new subscriber and return its id
    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            queue: VecDeque::new(),
        });
        id
    }

    /// Remove a subscriber and drop its pending events.
    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every current subscriber
    pub fn emit(&mut self, event: GameEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.queue.push_back(event);
        }
    }

    /// Take all pending events for a subscriber, oldest first
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<GameEvent> {
        self.subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| s.queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of events waiting for a subscriber
    pub fn pending(&self, id: SubscriptionId) -> usize {
        self.subscribers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.queue.len())
            .unwrap_or(0)
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
