//! Sound playback for the playSound action
//!
//! Audio hardware is outside the surface. A [`SoundPlayer`] receives the
//! request and reports failure; the surface only logs the outcome.

use std::{path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::SoundError;

/// Volume used when a playSound message does not carry one
pub const DEFAULT_VOLUME: f64 = 0.5;
/// Audio asset played when the timer ends
pub const DEFAULT_SOUND_ASSET: &str = "sounds/timer_end.mp3";

/// One playback request
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub asset: PathBuf,
    /// In `0.0..=1.0`
    pub volume: f64,
}

/// Clamp a host-supplied volume into range, falling back to the default for NaN
pub fn normalize_volume(volume: Option<f64>) -> f64 {
    match volume {
        Some(v) if v.is_nan() => DEFAULT_VOLUME,
        Some(v) => v.clamp(0.0, 1.0),
        None => DEFAULT_VOLUME,
    }
}

pub trait SoundPlayer: Send + Sync + 'static {
    fn play(&self, request: SoundRequest) -> BoxFuture<'static, Result<(), SoundError>>;
}

/// Plays sounds by running an external program as `<program> <asset> <volume>`
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    program: String,
}

impl CommandSoundPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, request: SoundRequest) -> BoxFuture<'static, Result<(), SoundError>> {
        let program = self.program.clone();
        Box::pin(async move {
            if !request.asset.exists() {
                return Err(SoundError::MissingAsset(request.asset));
            }

            debug!("Running {} for {}", program, request.asset.display());
            let output = Command::new(&program)
                .arg(&request.asset)
                .arg(format!("{:.2}", request.volume))
                .output()
                .await
                .map_err(|source| SoundError::Launch {
                    program: program.clone(),
                    source,
                })?;

            if !output.status.success() {
                return Err(SoundError::Failed {
                    program,
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            Ok(())
        })
    }
}

/// Accepts every request without producing audio
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSoundPlayer;

impl SoundPlayer for SilentSoundPlayer {
    fn play(&self, request: SoundRequest) -> BoxFuture<'static, Result<(), SoundError>> {
        Box::pin(async move {
            info!(
                "No sound command configured, skipping {} at volume {:.2}",
                request.asset.display(),
                request.volume
            );
            Ok(())
        })
    }
}

/// Start playback in the background; failures are logged, never returned
pub fn trigger_sound(player: &Arc<dyn SoundPlayer>, request: SoundRequest) {
    let playback = player.play(request.clone());
    tokio::spawn(async move {
        match playback.await {
            Ok(()) => debug!("Played {}", request.asset.display()),
            Err(e) => error!("Error playing sound {}: {}", request.asset.display(), e),
        }
    });
}
