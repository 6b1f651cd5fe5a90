//! Entrance/exit animation curves, sampled as a pure function of time.

use std::time::Duration;

pub const DEFAULT_TWEEN: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    FadeIn,
    FadeOut,
    SlideDown,
    SlideUp,
}

/// One sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Opacity for fades, height in pixels for slides.
    pub value: f64,
    pub done: bool,
    /// Whether the element is displayed at all.
    pub visible: bool,
}

/// A linear animation between `from` and its kind's end state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    kind: TweenKind,
    start: Duration,
    duration: Duration,
    /// Starting opacity (fade out), current height (slide up) or target height
    /// (slide down). Ignored by fade in.
    extent: f64,
}

impl Tween {
    pub fn new(kind: TweenKind, start: Duration, duration: Duration, extent: f64) -> Self {
        Self {
            kind,
            start,
            duration,
            extent,
        }
    }

    pub fn fade_in(start: Duration) -> Self {
        Self::new(TweenKind::FadeIn, start, DEFAULT_TWEEN, 1.0)
    }

    pub fn fade_out(start: Duration, from_opacity: f64) -> Self {
        Self::new(TweenKind::FadeOut, start, DEFAULT_TWEEN, from_opacity)
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Duration) -> Frame {
        let p = self.progress(now);
        let done = p >= 1.0;
        let (value, visible) = match self.kind {
            TweenKind::FadeIn => (p, true),
            TweenKind::FadeOut => (self.extent * (1.0 - p), !done),
            TweenKind::SlideDown => (self.extent * p, true),
            TweenKind::SlideUp => (self.extent * (1.0 - p), !done),
        };
        Frame {
            value,
            done,
            visible,
        }
    }
}
