//! Timer record structure and display defaults

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::utils::format_time;

/// Title used when the host sends none, or only whitespace
pub const DEFAULT_TITLE: &str = "Countdown";
/// Alert color used when the host sends none
pub const DEFAULT_FLASH_COLOR: &str = "#ff0000";

/// Host-assigned identity of one on-screen timer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DisplayId(String);

impl DisplayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DisplayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Remaining time as last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLeft {
    Seconds(u64),
    /// The host sent something that is not a non-negative number
    Invalid,
}

impl TimeLeft {
    /// Truncate a raw seconds value; NaN, infinite and negative values are invalid
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self::Seconds(value.trunc() as u64)
        } else {
            Self::Invalid
        }
    }

    /// Read a time value from a host payload field.
    ///
    /// Numbers and numeric strings are accepted, anything else is invalid.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(whole) => Self::Seconds(whole),
                None => n.as_f64().map_or(Self::Invalid, Self::from_f64),
            },
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_or(Self::Invalid, Self::from_f64),
            _ => Self::Invalid,
        }
    }

    pub fn seconds(self) -> Option<u64> {
        match self {
            Self::Seconds(total) => Some(total),
            Self::Invalid => None,
        }
    }
}

impl Serialize for TimeLeft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.seconds().serialize(serializer)
    }
}

/// Screen anchor, as offsets from the top and right edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub top: f64,
    pub right: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            top: 25.0,
            right: 3.0,
        }
    }
}

/// Where a record is in its fade lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Created, waiting for the next frame to fade in
    Entering,
    Visible,
    /// Fading out, removal scheduled
    Retiring,
}

/// Everything a show message carries
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
    pub display_id: DisplayId,
    pub title: Option<String>,
    pub duration: TimeLeft,
    pub position: Option<Position>,
    pub flash_color: Option<String>,
    pub timer_tag: Option<Value>,
}

impl TimerSpec {
    pub fn new(display_id: impl Into<DisplayId>, duration: TimeLeft) -> Self {
        Self {
            display_id: display_id.into(),
            title: None,
            duration,
            position: None,
            flash_color: None,
            timer_tag: None,
        }
    }
}

/// Partial update from an update message; `None` leaves a field unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct TimerUpdate {
    pub display_id: DisplayId,
    pub time_left: TimeLeft,
    pub flash: Option<bool>,
    pub flash_color: Option<String>,
}

impl TimerUpdate {
    pub fn new(display_id: impl Into<DisplayId>, time_left: TimeLeft) -> Self {
        Self {
            display_id: display_id.into(),
            time_left,
            flash: None,
            flash_color: None,
        }
    }
}

/// Request to fade a timer out and remove it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideRequest {
    pub display_id: DisplayId,
    pub fade_out: Option<Duration>,
}

/// One countdown timer as rendered by the view layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub display_id: DisplayId,
    pub title: String,
    pub time_left: TimeLeft,
    pub time_left_formatted: String,
    pub position: Position,
    pub is_flashing: bool,
    pub flash_color: String,
    pub opacity: f64,
    #[serde(rename = "timerId", skip_serializing_if = "Option::is_none")]
    pub timer_tag: Option<Value>,
    pub phase: Phase,
    /// Store-assigned identity, distinct for every create of the same display id
    #[serde(skip)]
    pub generation: u64,
}

impl TimerRecord {
    /// Build a fresh, fully transparent record from a show message
    pub fn new(spec: TimerSpec, generation: u64) -> Self {
        let title = spec
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let flash_color = spec
            .flash_color
            .filter(|color| !color.is_empty())
            .unwrap_or_else(|| DEFAULT_FLASH_COLOR.to_string());

        Self {
            display_id: spec.display_id,
            title,
            time_left: spec.duration,
            time_left_formatted: format_time(spec.duration),
            position: spec.position.unwrap_or_default(),
            is_flashing: false,
            flash_color,
            opacity: 0.0,
            timer_tag: spec.timer_tag,
            phase: Phase::Entering,
            generation,
        }
    }

    /// Set the remaining time and its display string together
    pub fn set_time_left(&mut self, time_left: TimeLeft) {
        self.time_left = time_left;
        self.time_left_formatted = format_time(time_left);
    }

    pub fn is_retiring(&self) -> bool {
        self.phase == Phase::Retiring
    }
}
