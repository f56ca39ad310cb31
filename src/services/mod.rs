//! External collaborator services
//!
//! Sound playback is the only service the display surface calls out to.

pub mod sound;

pub use sound::*;
