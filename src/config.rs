//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{services::DEFAULT_SOUND_ASSET, state::DEFAULT_FADE_OUT};

/// Delay before a created timer fades in, roughly one 60 Hz frame
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Settings the display surface runs with
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Delay between a create and its fade-in
    pub frame_interval: Duration,
    /// Fade window for hide messages that do not name one
    pub default_fade_out: Duration,
    /// Asset handed to the sound player on playSound
    pub sound_asset: PathBuf,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            default_fade_out: DEFAULT_FADE_OUT,
            sound_asset: PathBuf::from(DEFAULT_SOUND_ASSET),
        }
    }
}

/// CLI argument parsing structure for the host harness
#[derive(Parser, Debug)]
#[command(name = "countdown-overlay")]
#[command(about = "Drive countdown timer displays from newline-delimited JSON host events")]
#[command(version)]
pub struct Config {
    /// Fade-in delay after a timer is shown, in milliseconds
    #[arg(long, default_value = "16")]
    pub frame_ms: u64,

    /// Default fade-out window for hidden timers, in milliseconds
    #[arg(long, default_value = "500")]
    pub fade_out_ms: u64,

    /// Audio asset played on playSound
    #[arg(long, default_value = DEFAULT_SOUND_ASSET)]
    pub sound_asset: PathBuf,

    /// Program run as `<program> <asset> <volume>` to play sounds
    #[arg(long)]
    pub sound_command: Option<String>,

    /// Print the latest snapshot to stdout as a JSON line whenever it changes.
    /// Events handled in a burst coalesce into one line.
    #[arg(short, long)]
    pub print_snapshots: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Settings for the display surface
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            frame_interval: Duration::from_millis(self.frame_ms),
            default_fade_out: Duration::from_millis(self.fade_out_ms),
            sound_asset: self.sound_asset.clone(),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
