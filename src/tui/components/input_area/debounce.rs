//! Trailing-edge debounce timer.
//!
//! The event loop is single threaded, so the timer is just a deadline that the
//! loop polls. Scheduling again before the deadline replaces it; the action
//! fires once, after the burst of triggers has gone quiet for `wait`.
//!
//! ```text
//! change  change      change
//!   │       │           │
//!   ▼       ▼           ▼
//! ──┬───────┬───────────┬──────────────────┬──▶ time
//!   └─ x ───┴──── x ────┴────── wait ──────┘
//!                                        fire
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(100);

    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Cancel whatever is pending and start a fresh quiet period at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` exactly once per quiet period, the first time `now` reaches the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending deadline, zero if it has already passed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WAIT)
    }
}
