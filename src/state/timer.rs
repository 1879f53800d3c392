//! Timer Module - Cancellable deadline timers
//!
//! Widgets never spawn threads or register callbacks for time-based
//! behavior. A [`Timer`] is plain state owned by the widget: a deadline and
//! an optional period. The host loop passes the current `Instant` to the
//! widget's `tick`, which polls its timers.
//!
//! Cancelling is just clearing the deadline, so a cancelled or replaced timer
//! cannot fire later.
//!
//! # Example
//!
//! ```
//! use spark_widgets::state::Timer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut timer = Timer::interval(start, Duration::from_millis(100));
//!
//! assert_eq!(timer.poll(start + Duration::from_millis(50)), 0);
//! assert_eq!(timer.poll(start + Duration::from_millis(350)), 3);
//!
//! timer.cancel();
//! assert_eq!(timer.poll(start + Duration::from_secs(10)), 0);
//! ```

use std::time::{Duration, Instant};

/// Shortest interval period. Keeps a zero period from firing unboundedly.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A one-shot or repeating deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
    period: Option<Duration>,
}

impl Timer {
    /// A disarmed timer.
    pub const fn idle() -> Self {
        Self {
            deadline: None,
            period: None,
        }
    }

    /// Fires once, `delay` after `now`.
    pub fn once(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: Some(now + delay),
            period: None,
        }
    }

    /// Fires every `period`, first at `now + period`.
    pub fn interval(now: Instant, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            deadline: Some(now + period),
            period: Some(period),
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn is_interval(&self) -> bool {
        self.period.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the next firing, zero if overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Disarm. Later polls return 0.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.period = None;
    }

    /// Number of firings due by `now`.
    ///
    /// A one-shot timer fires at most once and disarms itself. An interval
    /// timer reports every period that elapsed and moves its deadline past
    /// `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }

        match self.period {
            None => {
                self.deadline = None;
                1
            }
            Some(period) => {
                let late = now.duration_since(deadline);
                let extra = late.as_nanos() / period.as_nanos();
                let fired = extra.saturating_add(1).min(u32::MAX as u128) as u32;
                self.deadline = Some(deadline + period * fired);
                fired
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
