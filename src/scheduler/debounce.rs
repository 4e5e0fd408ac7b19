//! Trailing-edge debouncer.
//!
//! Every `trigger` pushes the deadline to `now + window`; `poll` reports
//! true exactly once when the clock reaches a deadline no later trigger
//! has replaced.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, deadline: None }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record an event at `now`, restarting the quiet window.
    pub fn trigger(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.window_ms));
    }

    /// Has the quiet window elapsed? Consumes the pending deadline.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
