//! Time-windowed single-fire scheduling
//!
//! Every call to `schedule` resets the window: it stores the newest value
//! and hands back a ticket. The caller sleeps for `window()` and then
//! presents the ticket to `fire`. Only the latest ticket yields the value,
//! so a burst of calls collapses into one invocation with the final value.
//!
//! Tickets also act as generation tokens for the work started after a fire:
//! `is_current` stays true until the next `schedule` or `cancel`.

use std::time::Duration;

/// Identifies one `schedule` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    /// How long the caller must wait before presenting a ticket
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending value and restart the window
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Take the pending value if `ticket` is still the latest one
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if self.is_current(ticket) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop any pending value and invalidate every outstanding ticket
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// The most recent ticket handed out
    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}
