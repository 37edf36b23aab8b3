//! Exponential backoff for reconnection

use std::time::Duration;

/// Doubling delay between failed connect attempts
///
/// The delay doubles after each failure while it is still below `max`, then
/// holds. With 3 and 192 that yields 3, 6, 12, 24, 48, 96, 192, 192, ...
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Delay returned by the next call
    current: Duration,
    /// Doubling stops once this is reached
    max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            current: initial,
            max,
        }
    }

    /// Get the next delay and advance the backoff
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        if self.current < self.max {
            self.current = std::cmp::min(self.current * 2, self.max);
        }
        delay
    }

    /// Delay the next call would return, without advancing
    pub fn peek(&self) -> Duration {
        self.current
    }
}
