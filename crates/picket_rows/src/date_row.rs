//! Date and time rows.
//!
//! [`DateRow`] is the headless model behind date, time, datetime, and
//! countdown rows. The wheel kind is an explicit [`DateFieldKind`] tag the
//! host switches on; the model itself enforces what a platform wheel would
//! enforce visually: bounds and minute intervals.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::config::RowConfig;

// =============================================================================
// DateFieldKind
// =============================================================================

/// Which wheel a host shows for a date row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFieldKind {
    /// Calendar date, no time of day.
    Date,
    /// Time of day, no date.
    Time,
    /// Date and time of day.
    DateTime,
    /// An hour/minute duration.
    CountDown,
}

// =============================================================================
// DateFormat
// =============================================================================

/// How a date row renders its value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    /// Kind-appropriate default: medium date, short time, `H:mm` countdown.
    #[default]
    Standard,
    /// A chrono `strftime` pattern.
    Custom(String),
}

impl DateFormat {
    /// The `strftime` pattern used for `kind`.
    pub fn pattern(&self, kind: DateFieldKind) -> &str {
        match self {
            DateFormat::Custom(pattern) => pattern,
            DateFormat::Standard => match kind {
                DateFieldKind::Date => "%b %-d, %Y",
                DateFieldKind::Time => "%-I:%M %p",
                DateFieldKind::DateTime => "%b %-d, %Y, %-I:%M %p",
                DateFieldKind::CountDown => "%-H:%M",
            },
        }
    }
}

// =============================================================================
// Listeners
// =============================================================================

new_key_type! {
    /// Handle for a registered value listener.
    pub struct ValueListenerId;
    /// Handle for a registered highlight listener.
    pub struct HighlightListenerId;
}

/// Value-changed listener, receiving the new value by parameter.
pub type ValueFn = Arc<dyn Fn(Option<&NaiveDateTime>) + Send + Sync>;

/// Highlight-changed listener.
pub type HighlightFn = Arc<dyn Fn(bool) + Send + Sync>;

// =============================================================================
// DateRow
// =============================================================================

/// Headless state for a date/time row.
///
/// `minimum`, `maximum`, and `minute_interval` describe what the host's wheel
/// offers; [`picked`](Self::picked) re-enforces them on the way in so the
/// stored value never depends on the wheel having done so. Out-of-range picks
/// clamp, they never fail.
pub struct DateRow {
    config: RowConfig,
    kind: DateFieldKind,
    value: Option<NaiveDateTime>,
    minimum: Option<NaiveDateTime>,
    maximum: Option<NaiveDateTime>,
    minute_interval: Option<u32>,
    format: DateFormat,
    value_listeners: SlotMap<ValueListenerId, ValueFn>,
    highlight_listeners: SlotMap<HighlightListenerId, HighlightFn>,
}

impl DateRow {
    /// A row for `kind` with no value and a blank detail slot.
    pub fn new(kind: DateFieldKind) -> Self {
        Self {
            config: RowConfig {
                no_value_display_text: Some(" ".to_string()),
                ..RowConfig::default()
            },
            kind,
            value: None,
            minimum: None,
            maximum: None,
            minute_interval: None,
            format: DateFormat::default(),
            value_listeners: SlotMap::with_key(),
            highlight_listeners: SlotMap::with_key(),
        }
    }

    /// Set the row title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Enable or disable the row.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Set the initial value as-is, without normalization.
    pub fn value(mut self, value: NaiveDateTime) -> Self {
        self.value = Some(value);
        self
    }

    /// Earliest pickable instant.
    pub fn minimum(mut self, minimum: NaiveDateTime) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Latest pickable instant.
    pub fn maximum(mut self, maximum: NaiveDateTime) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Wheel minute step. Intervals that do not divide evenly into 60 are
    /// ignored, matching what platform wheels accept.
    pub fn minute_interval(mut self, interval: u32) -> Self {
        self.minute_interval = Some(interval);
        self
    }

    /// Override the display format.
    pub fn format(mut self, format: DateFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the detail text shown while no value is set.
    pub fn no_value_text(mut self, text: impl Into<String>) -> Self {
        self.config.no_value_display_text = Some(text.into());
        self
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// Wheel callback: store a picked instant.
    ///
    /// The pick is normalized before storing: seconds drop, minutes snap to
    /// the nearest interval multiple, and the result clamps into
    /// `[minimum, maximum]`. Bounds win over the interval when they disagree.
    /// Fires value listeners only when the stored value actually changed.
    pub fn picked(&mut self, picked: NaiveDateTime) {
        let normalized = self.normalize(picked);
        if normalized != picked {
            tracing::debug!("pick {} normalized to {}", picked, normalized);
        }
        if self.value != Some(normalized) {
            self.value = Some(normalized);
            self.notify_value();
        }
    }

    /// Replace the value as-is, without normalization. `None` clears it.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        if self.value != value {
            self.value = value;
            self.notify_value();
        }
    }

    /// Toggle the editing highlight, firing highlight listeners on change.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.config.highlighted != highlighted {
            self.config.highlighted = highlighted;
            for listener in self.highlight_listeners.values() {
                listener(highlighted);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    /// Detail text: the formatted value, else the configured no-value text.
    ///
    /// A [`DateFormat::Custom`] pattern chrono cannot render also falls back
    /// to the no-value text; formatting never panics on a bad pattern.
    pub fn display_value(&self) -> String {
        if let Some(value) = self.value {
            let mut text = String::new();
            if write!(text, "{}", value.format(self.format.pattern(self.kind))).is_ok() {
                return text;
            }
            tracing::warn!("date pattern {:?} did not render", self.format.pattern(self.kind));
        }
        self.config
            .no_value_display_text
            .clone()
            .unwrap_or_default()
    }

    /// The instant a wheel should start from: the current value, else `now`
    /// as supplied by the host, normalized the same way picks are. The model
    /// never reads a clock itself.
    pub fn picker_seed(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.normalize(self.value.unwrap_or(now))
    }

    /// The stored value.
    pub fn get_value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Wheel kind tag.
    pub fn kind(&self) -> DateFieldKind {
        self.kind
    }

    /// Row chrome.
    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Earliest pickable instant, when bounded.
    pub fn get_minimum(&self) -> Option<NaiveDateTime> {
        self.minimum
    }

    /// Latest pickable instant, when bounded.
    pub fn get_maximum(&self) -> Option<NaiveDateTime> {
        self.maximum
    }

    /// Configured wheel minute step.
    pub fn get_minute_interval(&self) -> Option<u32> {
        self.minute_interval
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a value-changed listener.
    pub fn on_value_changed(
        &mut self,
        f: impl Fn(Option<&NaiveDateTime>) + Send + Sync + 'static,
    ) -> ValueListenerId {
        self.value_listeners.insert(Arc::new(f))
    }

    /// Register a highlight-changed listener.
    pub fn on_highlight_changed(
        &mut self,
        f: impl Fn(bool) + Send + Sync + 'static,
    ) -> HighlightListenerId {
        self.highlight_listeners.insert(Arc::new(f))
    }

    /// Remove a value listener by id.
    pub fn remove_value_listener(&mut self, id: ValueListenerId) -> bool {
        self.value_listeners.remove(id).is_some()
    }

    /// Remove a highlight listener by id.
    pub fn remove_highlight_listener(&mut self, id: HighlightListenerId) -> bool {
        self.highlight_listeners.remove(id).is_some()
    }

    /// Drop every listener.
    pub fn detach_listeners(&mut self) {
        self.value_listeners.clear();
        self.highlight_listeners.clear();
    }

    // -------------------------------------------------------------------------
    // Normalization
    // -------------------------------------------------------------------------

    fn normalize(&self, value: NaiveDateTime) -> NaiveDateTime {
        let mut value = value.with_second(0).unwrap_or(value);
        value = value.with_nanosecond(0).unwrap_or(value);

        if let Some(interval) = self.minute_interval.filter(|i| *i > 1 && 60 % *i == 0) {
            let minute = value.minute();
            let steps = (f64::from(minute) / f64::from(interval)).round() as i64;
            let snapped = steps * i64::from(interval);
            // Snapping up from :59 carries into the next hour. At the edge of
            // the representable range the carry overflows and the minute stays
            // unsnapped; the bounds clamp below still applies.
            value = value
                .checked_add_signed(Duration::minutes(snapped - i64::from(minute)))
                .unwrap_or(value);
        }

        if let Some(minimum) = self.minimum {
            if value < minimum {
                value = minimum;
            }
        }
        if let Some(maximum) = self.maximum {
            if value > maximum {
                value = maximum;
            }
        }
        value
    }

    fn notify_value(&self) {
        for listener in self.value_listeners.values() {
            listener(self.value.as_ref());
        }
    }
}

impl fmt::Debug for DateRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRow")
            .field("config", &self.config)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("minute_interval", &self.minute_interval)
            .field("format", &self.format)
            .field("value_listeners", &self.value_listeners.len())
            .field("highlight_listeners", &self.highlight_listeners.len())
            .finish()
    }
}
