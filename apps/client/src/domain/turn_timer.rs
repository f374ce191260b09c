//! Informational countdown while it is the local player's turn.
//!
//! The coordinator enforces the real timeout; the local value may go negative.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnTimer {
    seconds_remaining: i64,
    is_local_turn: bool,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, timeout_seconds: i64) {
        self.seconds_remaining = timeout_seconds;
        self.is_local_turn = true;
    }

    pub fn stop(&mut self) {
        self.is_local_turn = false;
    }

    /// Decrements by one while it is the local turn; returns the new value if so.
    pub fn tick(&mut self) -> Option<i64> {
        if !self.is_local_turn {
            return None;
        }
        self.seconds_remaining -= 1;
        Some(self.seconds_remaining)
    }

    pub fn seconds_remaining(&self) -> i64 {
        self.seconds_remaining
    }

    pub fn is_local_turn(&self) -> bool {
        self.is_local_turn
    }

    /// Countdown to show, suppressed outside the local turn.
    pub fn display(&self) -> Option<i64> {
        self.is_local_turn.then_some(self.seconds_remaining)
    }
}
