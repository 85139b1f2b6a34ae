//! Single-slot debounce timer.
//!
//! Recalculation and autosave are driven by keystroke-level input events;
//! a burst of edits should produce one recalculation (and one persistence
//! write), not one per keystroke. Each logical action owns one
//! [`Debounce`]: arming it supersedes any pending deadline, and polling
//! fires at most once per arm. There is no background thread — the
//! session is single-threaded and polls with its own clock, which also
//! keeps the timer trivially testable.

use std::time::{Duration, Instant};

/// Debounce window for line and document input changes.
pub const RECALC_DEBOUNCE: Duration = Duration::from_millis(300);
/// Debounce window for draft autosave.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// A cancellable trailing-edge timer with a single pending slot.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Schedule a fire `wait` after `now`, cancelling any pending fire.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// Drop any pending fire.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once after the deadline passes; clears the slot.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
