//! Alert Primitive - Transient messages and a bounded alert queue.
//!
//! An [`Alert`] is a bordered message box with an icon per type, an optional
//! timestamp and an optional `[x]` dismiss affordance. Showing it arms an
//! auto-hide timer unless it's persistent; [`Alert::tick`] polls that timer.
//!
//! Every visibility transition returns an [`AlertEvent`]. The
//! [`AlertManager`] routes those events: whenever one of its alerts stops
//! being visible it promotes the oldest queued alert in the same call, so
//! no more than `max_visible` are ever shown.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use spark_widgets::primitives::{Alert, AlertManager, AlertProps, AlertType};
//!
//! let now = Instant::now();
//! let mut alerts = AlertManager::new(1).unwrap();
//! let first = alerts.add(Alert::new(AlertProps::new(AlertType::Info, "one")).unwrap(), now);
//! let second = alerts.add(Alert::new(AlertProps::new(AlertType::Success, "two")).unwrap(), now);
//! assert_eq!(alerts.visible_ids(), [first]);
//! assert_eq!(alerts.queued_ids(), vec![second]);
//!
//! alerts.hide(first, now);
//! assert_eq!(alerts.visible_ids(), [second]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, trace, warn};

use super::Widget;
use super::box_primitive::{bottom_border, framed_row, top_border};
use super::types::{AlertProps, AlertType, DismissCallback};
use crate::error::ConfigError;
use crate::layout::{align_text, string_width, wrap_text};
use crate::renderer::{Frame, Line, Style};
use crate::state::{KeyCode, KeyEvent, Timer};
use crate::theme::{Theme, Token};
use crate::types::{Attr, TextAlign};

/// Narrowest alert: two border cells, two padding cells, one text cell.
const MIN_WIDTH: u16 = 5;
const DISMISS: &str = "[x]";
const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Visibility transition reported by an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    Shown,
    /// Hidden by `hide` or by the auto-hide timer.
    Hidden,
    /// Hidden by the user; the dismiss hook has run.
    Dismissed,
}

impl AlertEvent {
    /// Whether the alert stopped being visible.
    pub fn frees_slot(&self) -> bool {
        matches!(self, Self::Hidden | Self::Dismissed)
    }
}

fn color_token(alert_type: AlertType) -> Token {
    match alert_type {
        AlertType::Success => Token::Success,
        AlertType::Error => Token::Error,
        AlertType::Warning => Token::Warning,
        AlertType::Info => Token::Info,
    }
}

// =============================================================================
// Alert
// =============================================================================

/// A transient message box.
#[derive(Clone)]
pub struct Alert {
    props: AlertProps,
    visible: bool,
    created_at: DateTime<Local>,
    hide_timer: Timer,
    on_dismiss: Option<DismissCallback>,
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("props", &self.props)
            .field("visible", &self.visible)
            .field("created_at", &self.created_at)
            .field("hide_timer", &self.hide_timer)
            .finish_non_exhaustive()
    }
}

impl Alert {
    /// Create a hidden alert. Fails if `width` is under 5.
    pub fn new(props: AlertProps) -> Result<Self, ConfigError> {
        if props.width < MIN_WIDTH {
            warn!(width = props.width, "rejected alert width");
            return Err(ConfigError::InvalidDimension {
                widget: "alert",
                field: "width",
                min: MIN_WIDTH,
                value: props.width,
            });
        }
        Ok(Self {
            props,
            visible: false,
            created_at: Local::now(),
            hide_timer: Timer::idle(),
            on_dismiss: None,
        })
    }

    /// Called when the alert is dismissed (not when it auto-hides).
    pub fn on_dismiss(mut self, f: impl Fn() + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(f));
        self
    }

    /// Override the creation time shown by the timestamp line.
    pub fn with_created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn props(&self) -> &AlertProps {
        &self.props
    }

    pub fn alert_type(&self) -> AlertType {
        self.props.alert_type
    }

    pub fn message(&self) -> &str {
        &self.props.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// When the auto-hide timer will fire, if armed.
    pub fn hides_at(&self) -> Option<Instant> {
        self.hide_timer.deadline()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Hidden -> Visible. Arms auto-hide unless persistent or the duration
    /// is zero.
    pub fn show(&mut self, now: Instant) -> Option<AlertEvent> {
        if self.visible {
            return None;
        }
        self.visible = true;
        if !self.props.persistent && self.props.duration > 0 {
            self.hide_timer = Timer::once(now, Duration::from_millis(self.props.duration));
        }
        debug!(kind = %self.props.alert_type, "alert shown");
        Some(AlertEvent::Shown)
    }

    /// Visible -> Hidden. Cancels any pending auto-hide.
    pub fn hide(&mut self) -> Option<AlertEvent> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        self.hide_timer.cancel();
        debug!(kind = %self.props.alert_type, "alert hidden");
        Some(AlertEvent::Hidden)
    }

    /// Hide and run the dismiss hook.
    pub fn dismiss(&mut self) -> Option<AlertEvent> {
        self.hide()?;
        debug!(kind = %self.props.alert_type, "alert dismissed");
        if let Some(f) = &self.on_dismiss {
            f();
        }
        Some(AlertEvent::Dismissed)
    }

    /// Poll the auto-hide timer.
    pub fn tick(&mut self, now: Instant) -> Option<AlertEvent> {
        if self.hide_timer.poll(now) == 0 {
            return None;
        }
        trace!("alert auto-hide fired");
        self.hide()
    }

    /// `x` or Escape dismisses a visible, dismissible alert.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<AlertEvent> {
        if !self.props.dismissible || !event.is_press() {
            return None;
        }
        match event.code {
            KeyCode::Escape | KeyCode::Char('x' | 'X') if !event.modifiers.ctrl => self.dismiss(),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn bordered(&self) -> bool {
        self.props.border_style.is_bordered()
    }

    /// Cells left for message text after borders and padding.
    fn inner_width(&self) -> u16 {
        let border = if self.bordered() { 2 } else { 0 };
        self.props.width.saturating_sub(border + 2)
    }

    fn body_lines(&self, theme: &Theme) -> Vec<Line> {
        let inner = self.inner_width();
        let accent = theme.styled(color_token(self.props.alert_type), Attr::BOLD);
        let text = theme.style(Token::Foreground);
        let muted = theme.style(Token::Muted);

        let icon = self
            .props
            .show_icon
            .then(|| format!("{} ", self.props.alert_type.icon()));
        let icon_width = icon.as_deref().map_or(0, string_width);
        let dismiss_width = if self.props.dismissible {
            string_width(DISMISS) + 1
        } else {
            0
        };
        let text_width = inner.saturating_sub(icon_width + dismiss_width);

        let mut wrapped = wrap_text(&self.props.message, text_width);
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }

        let mut lines = Vec::with_capacity(wrapped.len() + 1);
        for (i, chunk) in wrapped.iter().enumerate() {
            let mut line = Line::new();
            match (&icon, i) {
                (Some(icon), 0) => line.push(icon.clone(), accent),
                (Some(_), _) => line.push(" ".repeat(icon_width as usize), Style::PLAIN),
                (None, _) => {}
            }
            line.push(align_text(chunk, text_width, TextAlign::Left), text);
            if dismiss_width > 0 {
                if i == 0 {
                    line.push(format!(" {DISMISS}"), muted);
                } else {
                    line.push(" ".repeat(dismiss_width as usize), Style::PLAIN);
                }
            }
            lines.push(fit(line, inner));
        }

        if self.props.show_timestamp {
            let stamp = self.created_at.format(TIMESTAMP_FORMAT).to_string();
            lines.push(Line::new().with(align_text(&stamp, inner, TextAlign::Left), muted));
        }
        lines
    }
}

/// Pad or cut a line to exactly `width` cells.
fn fit(line: Line, width: u16) -> Line {
    let used = line.width();
    if used == width {
        return line;
    }
    if used < width {
        return line.with(" ".repeat((width - used) as usize), Style::PLAIN);
    }
    let mut out = Line::new();
    let mut left = width;
    for span in line.spans {
        if left == 0 {
            break;
        }
        let w = span.width();
        if w <= left {
            left -= w;
            out.spans.push(span);
        } else {
            let cut = align_text(&span.text, left, TextAlign::Left);
            out.push(cut, span.style);
            left = 0;
        }
    }
    out
}

impl Widget for Alert {
    /// A hidden alert renders nothing.
    fn render(&self, theme: &Theme) -> Frame {
        if !self.visible {
            return Frame::empty();
        }
        let border = self.props.border_style;
        let width = self.props.width;
        let border_style = theme.style(color_token(self.props.alert_type));

        let mut lines = Vec::new();
        if self.bordered() {
            lines.push(top_border(border, width, None, TextAlign::Left, border_style, border_style));
        }
        for body in self.body_lines(theme) {
            let mut padded = Line::new().with(" ", Style::PLAIN);
            padded.spans.extend(body.spans);
            padded.push(" ", Style::PLAIN);
            lines.push(framed_row(border, width, padded, border_style));
        }
        if self.bordered() {
            lines.push(bottom_border(border, width, border_style));
        }
        Frame::new(lines)
    }
}

// =============================================================================
// AlertManager
// =============================================================================

/// Handle to an alert owned by an [`AlertManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(u64);

/// Shows at most `max_visible` alerts; the rest wait in FIFO order.
#[derive(Debug)]
pub struct AlertManager {
    max_visible: usize,
    alerts: HashMap<AlertId, Alert>,
    /// Visible alerts in the order they were shown.
    visible: Vec<AlertId>,
    queue: VecDeque<AlertId>,
    next_id: u64,
}

impl AlertManager {
    /// Fails if `max_visible` is zero.
    pub fn new(max_visible: usize) -> Result<Self, ConfigError> {
        if max_visible == 0 {
            warn!("rejected alert manager capacity");
            return Err(ConfigError::InvalidDimension {
                widget: "alert manager",
                field: "max_visible",
                min: 1,
                value: 0,
            });
        }
        Ok(Self {
            max_visible,
            alerts: HashMap::new(),
            visible: Vec::new(),
            queue: VecDeque::new(),
            next_id: 0,
        })
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Visible alerts, oldest shown first.
    pub fn visible_ids(&self) -> &[AlertId] {
        &self.visible
    }

    /// Waiting alerts, next to show first.
    pub fn queued_ids(&self) -> Vec<AlertId> {
        self.queue.iter().copied().collect()
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Take ownership of an alert. It's shown now if a slot is free,
    /// otherwise queued.
    pub fn add(&mut self, mut alert: Alert, now: Instant) -> AlertId {
        let id = AlertId(self.next_id);
        self.next_id += 1;
        alert.hide();

        if self.visible.len() < self.max_visible {
            alert.show(now);
            self.visible.push(id);
        } else {
            debug!(?id, queued = self.queue.len() + 1, "alert queued");
            self.queue.push_back(id);
        }
        self.alerts.insert(id, alert);
        id
    }

    /// Hide a visible alert and promote the next queued one.
    pub fn hide(&mut self, id: AlertId, now: Instant) -> Vec<(AlertId, AlertEvent)> {
        let event = self.alerts.get_mut(&id).and_then(Alert::hide);
        self.route(id, event, now)
    }

    /// Dismiss a visible alert (runs its hook) and promote.
    pub fn dismiss(&mut self, id: AlertId, now: Instant) -> Vec<(AlertId, AlertEvent)> {
        let event = self.alerts.get_mut(&id).and_then(Alert::dismiss);
        self.route(id, event, now)
    }

    /// Poll every visible alert's timer. Returns the transitions, including
    /// promotions, in the order they happened.
    pub fn tick(&mut self, now: Instant) -> Vec<(AlertId, AlertEvent)> {
        let mut events = Vec::new();
        for id in self.visible.clone() {
            let event = self.alerts.get_mut(&id).and_then(|a| a.tick(now));
            events.extend(self.route(id, event, now));
        }
        events
    }

    /// Offer a key to the newest visible alert.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> Vec<(AlertId, AlertEvent)> {
        let Some(&id) = self.visible.last() else {
            return Vec::new();
        };
        let result = self.alerts.get_mut(&id).and_then(|a| a.handle_key(event));
        self.route(id, result, now)
    }

    /// Detach an alert whether visible or queued. Promotes if it was visible
    /// and reports transitions like [`AlertManager::hide`].
    pub fn remove(
        &mut self,
        id: AlertId,
        now: Instant,
    ) -> (Option<Alert>, Vec<(AlertId, AlertEvent)>) {
        if let Some(pos) = self.queue.iter().position(|&q| q == id) {
            self.queue.remove(pos);
            return (self.alerts.remove(&id), Vec::new());
        }
        let mut events = Vec::new();
        if let Some(event) = self.alerts.get_mut(&id).and_then(Alert::hide) {
            events.push((id, event));
            self.release(id, now, &mut events);
        }
        (self.alerts.remove(&id), events)
    }

    /// Hide everything and drop the queue.
    pub fn clear(&mut self) {
        self.queue.clear();
        for alert in self.alerts.values_mut() {
            alert.hide();
        }
        self.alerts.clear();
        self.visible.clear();
        debug!("alerts cleared");
    }

    fn route(
        &mut self,
        id: AlertId,
        event: Option<AlertEvent>,
        now: Instant,
    ) -> Vec<(AlertId, AlertEvent)> {
        let mut events = Vec::new();
        if let Some(event) = event {
            events.push((id, event));
            if event.frees_slot() {
                self.release(id, now, &mut events);
                self.alerts.remove(&id);
            }
        }
        events
    }

    /// Free `id`'s slot and fill free slots from the queue, oldest first.
    fn release(&mut self, id: AlertId, now: Instant, events: &mut Vec<(AlertId, AlertEvent)>) {
        self.visible.retain(|&v| v != id);
        while self.visible.len() < self.max_visible {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            if let Some(event) = self.alerts.get_mut(&next).and_then(|a| a.show(now)) {
                debug!(id = ?next, "alert promoted");
                self.visible.push(next);
                events.push((next, event));
            }
        }
    }
}

impl Widget for AlertManager {
    /// Visible alerts stacked top to bottom, oldest first.
    fn render(&self, theme: &Theme) -> Frame {
        Frame::stack(
            self.visible
                .iter()
                .filter_map(|id| self.alerts.get(id))
                .map(|alert| alert.render(theme)),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
