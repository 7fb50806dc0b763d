//! Running score.

use serde::{Deserialize, Serialize};

/// Running point total for a session.
///
/// Only grows: correct answers add the clue's value, nothing subtracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` points and return the new total.
    pub fn apply(&mut self, delta: u32) -> u32 {
        self.total = self.total.saturating_add(delta);
        self.total
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}
