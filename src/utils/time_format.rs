//! Countdown display formatting

use crate::state::TimeLeft;

/// Shown whenever the remaining time is not a usable number
pub const FALLBACK_DISPLAY: &str = "00:00";

/// Format remaining time as `MM:SS`, or `HH:MM:SS` once an hour or more is left
pub fn format_time(time_left: TimeLeft) -> String {
    match time_left {
        TimeLeft::Seconds(total) => format_whole_seconds(total),
        TimeLeft::Invalid => FALLBACK_DISPLAY.to_string(),
    }
}

/// Format a raw, possibly fractional or invalid, seconds value
pub fn format_seconds(total_seconds: f64) -> String {
    format_time(TimeLeft::from_f64(total_seconds))
}

fn format_whole_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
