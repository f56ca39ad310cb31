//! Inbound host message structures and payload parsing

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::MessageError,
    state::{DisplayId, HideRequest, Position, TimeLeft, TimerSpec, TimerUpdate},
};

/// Action kinds the surface understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show,
    Update,
    Hide,
    PlaySound,
}

impl Action {
    /// Resolve an action name, including the older `*Timer` spellings
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "show" | "showTimer" => Some(Self::Show),
            "update" | "updateTimer" => Some(Self::Update),
            "hide" | "hideTimer" => Some(Self::Hide),
            "playSound" => Some(Self::PlaySound),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Update => "update",
            Self::Hide => "hide",
            Self::PlaySound => "playSound",
        }
    }
}

/// A validated host message
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show(TimerSpec),
    Update(TimerUpdate),
    Hide(HideRequest),
    /// Volume as sent by the host, not yet clamped
    PlaySound { volume: Option<f64> },
}

/// Every field any action may carry. Fields stay untyped so one bad field
/// never makes the whole payload unreadable. `flash` is read from the object
/// directly because an explicit `null` must not collapse into "absent".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    display_id: Option<Value>,
    title: Option<Value>,
    duration: Option<Value>,
    time_left: Option<Value>,
    flash_color: Option<Value>,
    position: Option<Value>,
    fade_out: Option<Value>,
    volume: Option<Value>,
    timer_id: Option<Value>,
}

/// Turn a raw host event into a [`Command`]
pub fn parse_event(event: &Value) -> Result<Command, MessageError> {
    let object = event.as_object().ok_or(MessageError::NotAnObject)?;
    let name = object
        .get("action")
        .and_then(Value::as_str)
        .ok_or(MessageError::MissingAction)?;
    let action =
        Action::from_name(name).ok_or_else(|| MessageError::UnknownAction(name.to_string()))?;

    let raw = RawMessage::deserialize(event).unwrap_or_default();
    match action {
        Action::Show => {
            let display_id = require_display_id(&raw, action)?;
            Ok(Command::Show(TimerSpec {
                display_id,
                title: raw.title.as_ref().and_then(non_blank_string),
                duration: time_field(raw.duration.as_ref()),
                position: raw
                    .position
                    .and_then(|value| Position::deserialize(value).ok()),
                flash_color: raw.flash_color.as_ref().and_then(non_blank_string),
                timer_tag: raw.timer_id,
            }))
        }
        Action::Update => {
            let display_id = require_display_id(&raw, action)?;
            Ok(Command::Update(TimerUpdate {
                display_id,
                time_left: time_field(raw.time_left.as_ref()),
                flash: object.get("flash").map(is_truthy),
                flash_color: raw.flash_color.as_ref().and_then(non_blank_string),
            }))
        }
        Action::Hide => {
            let display_id = require_display_id(&raw, action)?;
            Ok(Command::Hide(HideRequest {
                display_id,
                fade_out: raw.fade_out.as_ref().and_then(millis_field),
            }))
        }
        Action::PlaySound => Ok(Command::PlaySound {
            volume: raw.volume.as_ref().and_then(Value::as_f64),
        }),
    }
}

fn require_display_id(raw: &RawMessage, action: Action) -> Result<DisplayId, MessageError> {
    let missing = MessageError::MissingDisplayId {
        action: action.name(),
    };
    match raw.display_id.as_ref() {
        Some(Value::String(id)) => Ok(DisplayId::new(id.as_str())),
        Some(Value::Number(id)) => Ok(DisplayId::new(id.to_string())),
        _ => Err(missing),
    }
}

fn non_blank_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Host truthiness: `null`, `false`, `0`, NaN and `""` are false
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn time_field(value: Option<&Value>) -> TimeLeft {
    value.map_or(TimeLeft::Invalid, TimeLeft::from_json)
}

fn millis_field(value: &Value) -> Option<Duration> {
    let millis = value.as_f64()?;
    if millis.is_finite() && millis >= 0.0 {
        Some(Duration::from_millis(millis.trunc() as u64))
    } else {
        None
    }
}
