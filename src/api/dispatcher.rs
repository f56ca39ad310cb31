//! Routes host events to the handler for their action

use serde_json::Value;
use tracing::debug;

use super::messages::{parse_event, Command};
use crate::state::{HideRequest, TimerSpec, TimerUpdate};

/// The four things a host message can ask for
pub trait MessageHandler {
    fn show(&mut self, spec: TimerSpec);
    fn update(&mut self, update: TimerUpdate);
    fn hide(&mut self, request: HideRequest);
    fn play_sound(&mut self, volume: Option<f64>);
}

/// Route one host event. Returns `false` when the event was dropped as
/// malformed; that is never an error.
pub fn dispatch<H: MessageHandler + ?Sized>(handler: &mut H, event: &Value) -> bool {
    let command = match parse_event(event) {
        Ok(command) => command,
        Err(e) => {
            debug!("Dropping host event: {}", e);
            return false;
        }
    };

    match command {
        Command::Show(spec) => handler.show(spec),
        Command::Update(update) => handler.update(update),
        Command::Hide(request) => handler.hide(request),
        Command::PlaySound { volume } => handler.play_sound(volume),
    }
    true
}
