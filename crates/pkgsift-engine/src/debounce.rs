//! Trailing-edge debounce
//!
//! At most one deadline is outstanding. Scheduling again replaces it, so the
//! action fires once, `delay` after the last trigger.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer from `now`, dropping any earlier deadline.
    ///
    /// Returns `None`, with nothing pending, when `now + delay` is not a
    /// representable instant.
    pub fn schedule(&mut self, now: Instant) -> Option<Instant> {
        self.deadline = now.checked_add(self.delay);
        self.deadline
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed at `now`
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
