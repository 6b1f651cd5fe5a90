//! Debounce and throttle gates over a [`Clock`](crate::clock::Clock) reading.
//!
//! Both are pull-based: the caller reports calls and polls with the current time,
//! and the gate answers whether the wrapped action should run now.

use std::time::Duration;

/// Collapses bursts of calls into one.
///
/// Trailing mode fires once `wait` has passed since the last call. Leading mode
/// fires on the first call of a burst and stays quiet until the burst has been
/// idle for `wait`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    leading: bool,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn trailing(wait: Duration) -> Self {
        Self {
            wait,
            leading: false,
            deadline: None,
        }
    }

    pub fn leading(wait: Duration) -> Self {
        Self {
            wait,
            leading: true,
            deadline: None,
        }
    }

    /// Record a call. Returns `true` when the action should run immediately.
    pub fn call(&mut self, now: Duration) -> bool {
        let fire_now = self.leading && self.deadline.is_none_or(|d| now >= d);
        self.deadline = Some(now + self.wait);
        fire_now
    }

    /// Returns `true` once, when a trailing invocation is due.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                !self.leading
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Lets at most one call through per `limit` window.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    open_at: Option<Duration>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_at: None,
        }
    }

    pub fn try_acquire(&mut self, now: Duration) -> bool {
        if self.open_at.is_some_and(|open| now < open) {
            return false;
        }
        self.open_at = Some(now + self.limit);
        true
    }
}
