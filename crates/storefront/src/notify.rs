//! Transient confirmation messages.
//!
//! At most one notification is visible. Showing a new one cancels the pending
//! dismissal of the previous one and replaces it outright.

use std::time::Duration;

use crate::animation::{Frame, Tween, TweenKind};
use crate::clock::{TimerId, TimerQueue};

/// How long a notification stays fully visible before it starts leaving.
pub const DEFAULT_DISPLAY: Duration = Duration::from_millis(3_000);
/// Length of the slide-out phase before the notification is removed.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Showing,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub shown_at: Duration,
    pub phase: NotificationPhase,
    /// When the exit phase began.
    pub leaving_since: Option<Duration>,
}

impl Notification {
    /// Fade-in after showing, fade-out while leaving.
    pub fn frame(&self, now: Duration) -> Frame {
        match (self.phase, self.leaving_since) {
            (NotificationPhase::Leaving, Some(since)) => {
                Tween::new(TweenKind::FadeOut, since, EXIT_DURATION, 1.0).sample(now)
            }
            _ => Tween::fade_in(self.shown_at).sample(now),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    BeginExit(u64),
    Remove(u64),
}

#[derive(Debug)]
pub struct NotificationCenter {
    display_for: Duration,
    current: Option<Notification>,
    timers: TimerQueue<Step>,
    pending: Option<TimerId>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new(display_for: Duration) -> Self {
        Self {
            display_for,
            current: None,
            timers: TimerQueue::new(),
            pending: None,
            next_id: 0,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, now: Duration) -> &Notification {
        if let Some(timer) = self.pending.take() {
            self.timers.cancel(timer);
        }

        self.next_id += 1;
        let id = self.next_id;
        self.pending = Some(self.timers.schedule(now + self.display_for, Step::BeginExit(id)));

        self.current.insert(Notification {
            id,
            message: message.into(),
            shown_at: now,
            phase: NotificationPhase::Showing,
            leaving_since: None,
        })
    }

    /// Remove the current notification immediately.
    pub fn dismiss(&mut self) {
        if let Some(timer) = self.pending.take() {
            self.timers.cancel(timer);
        }
        self.current = None;
    }

    /// Advance dismissal timers to `now`.
    pub fn tick(&mut self, now: Duration) {
        loop {
            let due = self.timers.take_due(now);
            if due.is_empty() {
                break;
            }
            for (_, at, step) in due {
                self.pending = None;
                match step {
                    Step::BeginExit(id) => {
                        if let Some(n) = self.current.as_mut().filter(|n| n.id == id) {
                            n.phase = NotificationPhase::Leaving;
                            n.leaving_since = Some(at);
                            self.pending =
                                Some(self.timers.schedule(at + EXIT_DURATION, Step::Remove(id)));
                        }
                    }
                    Step::Remove(id) => {
                        if self.current.as_ref().is_some_and(|n| n.id == id) {
                            self.current = None;
                        }
                    }
                }
            }
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn notification_stays_then_leaves_then_disappears() {
        let mut center = NotificationCenter::default();
        center.show("담았습니다", ms(0));

        center.tick(ms(2_999));
        assert_eq!(center.current().map(|n| n.phase), Some(NotificationPhase::Showing));

        center.tick(ms(3_000));
        assert_eq!(center.current().map(|n| n.phase), Some(NotificationPhase::Leaving));

        center.tick(ms(3_300));
        assert!(center.current().is_none());
    }

    #[test]
    fn a_single_late_tick_runs_both_steps() {
        let mut center = NotificationCenter::default();
        center.show("hello", ms(0));
        center.tick(ms(10_000));
        assert!(center.current().is_none());
    }

    #[test]
    fn new_message_supersedes_previous_and_restarts_the_timer() {
        let mut center = NotificationCenter::default();
        center.show("first", ms(0));
        center.show("second", ms(2_000));

        center.tick(ms(3_100));
        let current = center.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.phase, NotificationPhase::Showing);

        center.tick(ms(5_000));
        assert_eq!(center.current().map(|n| n.phase), Some(NotificationPhase::Leaving));
        center.tick(ms(5_300));
        assert!(center.current().is_none());
    }

    #[test]
    fn replacing_a_leaving_notification_keeps_the_new_one() {
        let mut center = NotificationCenter::default();
        center.show("first", ms(0));
        center.tick(ms(3_100));
        center.show("second", ms(3_100));

        center.tick(ms(3_300));
        assert_eq!(center.current().map(|n| n.message.as_str()), Some("second"));
    }

    #[test]
    fn frame_fades_in_then_out() {
        let mut center = NotificationCenter::default();
        center.show("hi", ms(0));
        assert!((center.current().unwrap().frame(ms(150)).value - 0.5).abs() < 1e-9);
        assert_eq!(center.current().unwrap().frame(ms(1_000)).value, 1.0);

        center.tick(ms(3_000));
        let leaving = center.current().unwrap().frame(ms(3_150));
        assert!((leaving.value - 0.5).abs() < 1e-9);
        assert!(leaving.visible);
    }

    #[test]
    fn dismiss_clears_immediately() {
        let mut center = NotificationCenter::new(ms(500));
        center.show("bye", ms(0));
        center.dismiss();
        assert!(center.current().is_none());
        center.tick(ms(1_000));
        assert!(center.current().is_none());
    }
}
