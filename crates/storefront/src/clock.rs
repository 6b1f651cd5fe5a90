//! Time sources and a cancellable timer queue.
//!
//! Nothing in the storefront sleeps. Deferred work (notification dismissal,
//! debouncing) is recorded against a [`Clock`] reading and fired when the session
//! polls with a later reading, so tests drive time with a [`VirtualClock`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    millis: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, at: Duration) {
        let ms = u64::try_from(at.as_millis()).unwrap_or(u64::MAX);
        self.millis.store(ms, Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending deadlines carrying a payload. Cancelled timers never fire.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<(TimerId, Duration, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, payload: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push((id, due, payload));
        id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Remove and return every timer due at or before `now`, earliest first
    /// (ties in scheduling order).
    pub fn take_due(&mut self, now: Duration) -> Vec<(TimerId, Duration, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|(_, at, _)| *at <= now);
        self.entries = pending;
        due.sort_by_key(|(id, at, _)| (*at, *id));
        due
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|(_, at, _)| *at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn virtual_clock_clones_share_time() {
        let clock = VirtualClock::new();
        let other = clock.clone();
        clock.advance(ms(250));
        assert_eq!(other.now(), ms(250));
    }

    #[test]
    fn due_timers_fire_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(300), "late");
        timers.schedule(ms(100), "early");
        timers.schedule(ms(900), "future");

        let fired: Vec<&str> = timers.take_due(ms(500)).into_iter().map(|(_, _, p)| p).collect();

        assert_eq!(fired, vec!["early", "late"]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_due(), Some(ms(900)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(10), ());
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.take_due(ms(1_000)).is_empty());
    }
}
