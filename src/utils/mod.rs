//! Utility functions module
//!
//! Display formatting and process signal helpers.

pub mod signals;
pub mod time_format;

pub use signals::shutdown_signal;
pub use time_format::{format_seconds, format_time, FALLBACK_DISPLAY};
