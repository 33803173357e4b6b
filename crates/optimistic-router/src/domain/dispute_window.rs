//! # Dispute Window
//!
//! One global deadline. Flagging is allowed while `now < deadline`;
//! verification can only succeed once that stops holding.

use super::value_objects::Timestamp;

/// Global dispute deadline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisputeWindow {
    deadline: Timestamp,
}

impl DisputeWindow {
    pub fn new(deadline: Timestamp) -> Self {
        Self { deadline }
    }

    /// Replace the deadline. Any value is accepted, including one in the past
    /// or earlier than the previous deadline.
    pub fn set_deadline(&mut self, deadline: Timestamp) -> Timestamp {
        std::mem::replace(&mut self.deadline, deadline)
    }

    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// `now < deadline`
    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.deadline
    }
}
