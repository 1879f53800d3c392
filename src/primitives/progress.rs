//! Progress Primitive - Value bar with five styles, ETA and animation.
//!
//! The bar maps `value` in `[min, max]` to a percentage and draws it in one
//! of five styles. Time enters only through the `now` arguments: the host
//! loop calls [`ProgressBar::tick`] with the current instant, which advances
//! the animation and the clock the ETA is computed against.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use spark_widgets::primitives::{ProgressBar, ProgressProps};
//!
//! let mut bar = ProgressBar::new(
//!     ProgressProps { value: 50.0, max: 200.0, ..ProgressProps::default() },
//!     Instant::now(),
//! )
//! .unwrap();
//! assert_eq!(bar.percentage(), 25.0);
//!
//! let change = bar.complete();
//! assert!(change.completed_now);
//! assert!(!bar.complete().completed_now);
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::Widget;
use super::types::{CompleteCallback, ProgressProps, ProgressStyle, ProgressUpdateCallback};
use crate::error::ConfigError;
use crate::renderer::{Frame, Line};
use crate::state::Timer;
use crate::theme::{Theme, Token};

/// Default animation tick.
pub const ANIMATION_INTERVAL: Duration = Duration::from_millis(100);

/// Sub-cell glyphs cycled on the leading edge of an animating bar.
const EDGE_FRAMES: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];
/// Intensity steps for the gradient style, faint to solid.
const GRADIENT: [char; 4] = ['░', '▒', '▓', '█'];

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressChange {
    pub value: f64,
    pub percentage: f64,
    /// This mutation was the first to reach 100%.
    pub completed_now: bool,
}

/// A progress bar.
#[derive(Clone)]
pub struct ProgressBar {
    props: ProgressProps,
    start: Instant,
    clock: Instant,
    completed: bool,
    animation: Timer,
    animation_offset: usize,
    interval: Duration,
    on_update: Option<ProgressUpdateCallback>,
    on_complete: Option<CompleteCallback>,
}

impl fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("props", &self.props)
            .field("completed", &self.completed)
            .field("animating", &self.animation.is_armed())
            .field("animation_offset", &self.animation_offset)
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// Create a bar. `now` is the start time used for ETA.
    ///
    /// Fails on a zero width, non-finite bounds or `min > max`. The initial
    /// value is clamped, not rejected, unless it's NaN.
    pub fn new(mut props: ProgressProps, now: Instant) -> Result<Self, ConfigError> {
        if props.width == 0 {
            warn!("rejected progress bar width");
            return Err(ConfigError::InvalidDimension {
                widget: "progress bar",
                field: "width",
                min: 1,
                value: 0,
            });
        }
        for (field, v) in [("min", props.min), ("max", props.max)] {
            if !v.is_finite() {
                warn!(field, "rejected progress bar bound");
                return Err(ConfigError::NotFinite { field });
            }
        }
        if props.value.is_nan() {
            return Err(ConfigError::NotFinite { field: "value" });
        }
        if props.min > props.max {
            warn!(min = props.min, max = props.max, "rejected progress bar range");
            return Err(ConfigError::InvalidRange {
                min: props.min,
                max: props.max,
            });
        }
        props.value = props.value.clamp(props.min, props.max);

        let mut bar = Self {
            props,
            start: now,
            clock: now,
            completed: false,
            animation: Timer::idle(),
            animation_offset: 0,
            interval: ANIMATION_INTERVAL,
            on_update: None,
            on_complete: None,
        };
        bar.completed = bar.is_complete();
        bar.sync_animation(now);
        Ok(bar)
    }

    /// Called with `(value, percentage)` after every value change.
    pub fn on_update(mut self, f: impl Fn(f64, f64) + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    /// Called once when the bar first reaches 100%.
    pub fn on_complete(mut self, f: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    /// Change the animation tick (default 100ms).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        if self.animation.is_armed() {
            self.animation = Timer::interval(self.clock, interval);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn value(&self) -> f64 {
        self.props.value
    }

    pub fn props(&self) -> &ProgressProps {
        &self.props
    }

    /// Position of `value` in `[min, max]`, as 0..=100.
    ///
    /// An empty range reads as 100% once `value` reaches `max`.
    pub fn percentage(&self) -> f64 {
        percentage(self.props.value, self.props.min, self.props.max)
    }

    pub fn is_complete(&self) -> bool {
        self.percentage() >= 100.0
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_armed()
    }

    pub fn animation_offset(&self) -> usize {
        self.animation_offset
    }

    /// Estimated time left, from the elapsed time since start and
    /// `value / max`. None when progress is not strictly between 0 and 1.
    pub fn eta(&self, now: Instant) -> Option<Duration> {
        if self.props.max == 0.0 {
            return None;
        }
        let progress = self.props.value / self.props.max;
        if !(progress > 0.0 && progress < 1.0) {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        Some(Duration::from_secs_f64(elapsed * (1.0 - progress) / progress))
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Set the value, clamped to `[min, max]`. NaN is ignored.
    pub fn set_value(&mut self, value: f64) -> ProgressChange {
        if value.is_nan() {
            return self.change(false);
        }
        self.props.value = value.clamp(self.props.min, self.props.max);
        let percentage = self.percentage();
        trace!(value = self.props.value, percentage, "progress update");
        if let Some(f) = &self.on_update {
            f(self.props.value, percentage);
        }

        let completed_now = percentage >= 100.0 && !self.completed;
        if completed_now {
            self.completed = true;
            self.stop_animation();
            debug!("progress complete");
            if let Some(f) = &self.on_complete {
                f();
            }
        }
        self.change(completed_now)
    }

    pub fn increment(&mut self, amount: f64) -> ProgressChange {
        self.set_value(self.props.value + amount)
    }

    /// Jump to `max`.
    pub fn complete(&mut self) -> ProgressChange {
        self.set_value(self.props.max)
    }

    /// Back to `min`. Clears completion, restarts the ETA clock and, if
    /// enabled, the animation.
    pub fn reset(&mut self, now: Instant) -> ProgressChange {
        self.completed = false;
        self.start = now;
        self.clock = now;
        let change = self.set_value(self.props.min);
        self.sync_animation(now);
        change
    }

    /// Turn the animation on or off.
    pub fn set_animate(&mut self, enabled: bool, now: Instant) {
        self.props.animate = enabled;
        self.clock = now;
        self.sync_animation(now);
    }

    /// Advance time. Returns true if the bar needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.clock = now;
        let fired = self.animation.poll(now);
        if fired > 0 {
            self.animation_offset = self.animation_offset.wrapping_add(fired as usize);
            trace!(offset = self.animation_offset, "progress animation tick");
        }
        fired > 0 || self.props.show_eta
    }

    fn sync_animation(&mut self, now: Instant) {
        let wanted = self.props.animate && !self.is_complete();
        match (wanted, self.animation.is_armed()) {
            (true, false) => {
                self.animation = Timer::interval(now, self.interval);
                debug!("progress animation started");
            }
            (false, true) => self.stop_animation(),
            _ => {}
        }
    }

    fn stop_animation(&mut self) {
        if self.animation.is_armed() {
            self.animation.cancel();
            debug!("progress animation stopped");
        }
    }

    fn change(&self, completed_now: bool) -> ProgressChange {
        ProgressChange {
            value: self.props.value,
            percentage: self.percentage(),
            completed_now,
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn bar_line(&self, theme: &Theme) -> Line {
        let width = self.props.width as usize;
        let pct = self.percentage();
        let filled = ((pct / 100.0 * width as f64).round() as usize).min(width);
        let empty = width - filled;

        let fill = if self.is_complete() {
            theme.style(Token::Success)
        } else {
            theme.style(Token::Primary)
        };
        let muted = theme.style(Token::Muted);
        let run = |c: char, n: usize| c.to_string().repeat(n);

        let mut line = Line::new();
        match self.props.style {
            ProgressStyle::Bar => {
                line.push(run('█', filled), fill);
                if self.is_animating() && empty > 0 {
                    let edge = EDGE_FRAMES[self.animation_offset % EDGE_FRAMES.len()];
                    line.push(edge.to_string(), fill);
                    line.push(run('░', empty - 1), muted);
                } else {
                    line.push(run('░', empty), muted);
                }
            }
            ProgressStyle::Dots => {
                line.push(run('●', filled), fill);
                line.push(run('○', empty), muted);
            }
            ProgressStyle::Blocks => {
                line.push(run('▓', filled), fill);
                line.push(run('░', empty), muted);
            }
            ProgressStyle::Gradient => {
                let cells: String = (0..filled)
                    .map(|i| GRADIENT[(i * GRADIENT.len() / filled).min(GRADIENT.len() - 1)])
                    .collect();
                line.push(cells, fill);
                line.push(run(' ', empty), muted);
            }
            ProgressStyle::Minimal => {
                let marker = filled.min(width - 1);
                line.push(run('━', marker), fill);
                line.push("●", theme.style(Token::Accent));
                line.push(run('─', width - marker - 1), muted);
            }
        }
        line
    }
}

/// `clamp((value - min) / (max - min), 0, 1) * 100`, guarding `max == min`.
pub fn percentage(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return if value >= max { 100.0 } else { 0.0 };
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0) * 100.0
}

/// `2h 5m`, `3m 12s` or `42s`.
pub fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs_f64().round() as u64;
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}

impl Widget for ProgressBar {
    /// Draws `[label ]bar[ pct%][ value/max][ ETA: ...]` on one row. The ETA
    /// uses the instant last passed to `tick`.
    fn render(&self, theme: &Theme) -> Frame {
        let text = theme.style(Token::Foreground);
        let muted = theme.style(Token::Muted);
        let mut line = Line::new();

        if let Some(label) = self.props.label.as_deref().filter(|l| !l.is_empty()) {
            line.push(format!("{label} "), text);
        }
        line.spans.extend(self.bar_line(theme).spans);
        if self.props.show_percentage {
            line.push(format!(" {:.0}%", self.percentage()), text);
        }
        if self.props.show_value {
            line.push(format!(" {}/{}", self.props.value, self.props.max), muted);
        }
        if self.props.show_eta {
            if let Some(eta) = self.eta(self.clock) {
                line.push(format!(" ETA: {}", format_eta(eta)), muted);
            }
        }
        Frame::new(vec![line])
    }
}

// =============================================================================
// TESTS
// =============================================================================
