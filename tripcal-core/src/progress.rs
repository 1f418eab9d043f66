//! Loading messages shown while the completion call is in flight.
//!
//! Purely cosmetic: the rotation carries no data and is stopped as soon as
//! the call settles, whether it succeeded or failed.

use std::time::Duration;

/// How often the message changes.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(3);

pub const LOADING_MESSAGES: [&str; 5] = [
    "Finding the best routes around your destination...",
    "Picking local food worth the detour...",
    "Planning smooth transit between stops...",
    "Laying out your itinerary preview...",
    "Almost done. Are your bags packed?",
];

/// Cycles through [`LOADING_MESSAGES`], wrapping around.
#[derive(Debug, Clone, Default)]
pub struct ProgressMessages {
    step: usize,
}

impl ProgressMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static str {
        LOADING_MESSAGES[self.step % LOADING_MESSAGES.len()]
    }

    /// Move to the next message and return it.
    pub fn advance(&mut self) -> &'static str {
        self.step = (self.step + 1) % LOADING_MESSAGES.len();
        self.current()
    }
}
