// Queue of input edges waiting for the next frame tick

use super::action::InputEvent;
use std::collections::VecDeque;

/// Maximum number of queued edges to keep
const MAX_QUEUE_SIZE: usize = 30;

/// FIFO of input edges received since the last frame tick
///
/// Edges are applied in arrival order at the start of the next tick, which
/// gives every edge a single well-defined sequence point relative to state
/// resolution.
#[derive(Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    /// Create a new input queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Append an edge, dropping the oldest one when full
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
        if self.events.len() > MAX_QUEUE_SIZE {
            self.events.pop_front();
        }
    }

    /// Take every queued edge in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    /// Clear all queued edges
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Get the number of queued edges
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
