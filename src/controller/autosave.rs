// ABOUTME: Debounce timer for draft autosave
// An explicit deadline the controller owns - no background task, the app's
// tick loop polls it with the current instant

use std::time::{Duration, Instant};

/// Trailing-edge debounce: every `touch` re-arms the deadline one idle
/// window into the future, and `fire_due` reports (once) when the deadline
/// passes. Only the state as of the last touch inside a window gets
/// persisted; intermediate keystrokes are an accepted loss.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    /// Re-arm: the deadline moves to `now + window`.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True exactly once per armed window, when `now` has reached the
    /// deadline. Disarms on fire.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
