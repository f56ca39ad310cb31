//! Countdown Overlay - a message-driven countdown timer display surface
//!
//! The host posts JSON action messages (`show`, `update`, `hide`,
//! `playSound`); the surface keeps an ordered set of timer records for an
//! embedded web view and publishes a snapshot after every change.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod surface;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, SurfaceConfig};
pub use error::{MessageError, SoundError, SurfaceError};
pub use services::{CommandSoundPlayer, SilentSoundPlayer, SoundPlayer, SoundRequest};
pub use state::{DisplayId, Snapshot, TimeLeft, TimerRecord, TimerStore};
pub use surface::{DisplaySurface, SurfaceHandle};
pub use utils::{format_time, shutdown_signal};
