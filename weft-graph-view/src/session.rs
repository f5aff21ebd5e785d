//! Load supersession
//!
//! One session per viewer. Each load takes a generation ticket; when a new
//! load begins before an old one completes, the old result is dropped on
//! arrival. That is the whole cancellation model: work in flight is never
//! interrupted, its result is just ignored.

use tracing::debug;

/// Identifies one load within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Generation counter for ignore-superseded-result semantics
#[derive(Debug, Default)]
pub struct ViewerSession {
    generation: u64,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any load still in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Accept a finished load only when no newer load has begun since its
    /// ticket was issued. A stale result returns `None`, never an error.
    pub fn complete<T>(&self, ticket: LoadTicket, result: T) -> Option<T> {
        if ticket.0 == self.generation {
            Some(result)
        } else {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding superseded load result"
            );
            None
        }
    }
}
