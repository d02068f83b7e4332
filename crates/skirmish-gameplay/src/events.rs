//! Event bus carrying match events from the simulation to the host.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::combat::Hit;
use crate::game_state::MatchResult;

/// Events emitted by the match controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new match began
    MatchStarted {
        /// Match length in milliseconds
        duration_ms: f64,
    },
    /// An attack connected
    FighterHit(Hit),
    /// A fighter was knocked out or time ran out
    MatchEnded(MatchResult),
    /// Health and clock were reset for another round
    RematchStarted,
}

/// Event bus for broadcasting events to the host.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<MatchEvent>,
    /// Receiver for collecting events
    receiver: Receiver<MatchEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: MatchEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<MatchEvent> {
        self.receiver.try_iter().collect()
    }
}
