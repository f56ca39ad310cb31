//! Countdown Overlay - host harness
//!
//! Reads newline-delimited JSON host events from stdin and feeds them to a
//! display surface. Logs go to stderr; with `--print-snapshots` the latest
//! snapshot is written to stdout as one JSON line each time the printer wakes,
//! so a burst of events may show up as a single line.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use countdown_overlay::{
    config::Config,
    services::{CommandSoundPlayer, SilentSoundPlayer, SoundPlayer},
    surface::DisplaySurface,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_overlay={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-overlay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: frame={}ms, fade_out={}ms, sound_asset={}",
        config.frame_ms,
        config.fade_out_ms,
        config.sound_asset.display()
    );

    let player: Arc<dyn SoundPlayer> = match &config.sound_command {
        Some(program) => {
            info!("Playing sounds with `{}`", program);
            Arc::new(CommandSoundPlayer::new(program.as_str()))
        }
        None => Arc::new(SilentSoundPlayer),
    };

    let surface = DisplaySurface::start(config.surface_config(), player);

    let printer = config.print_snapshots.then(|| {
        let mut snapshots = surface.subscribe();
        tokio::spawn(async move {
            // Ends once the surface task drops its sender
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                match serde_json::to_string(&snapshot) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to serialize snapshot: {}", e),
                }
            }
        })
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Value>(&line) {
                        Ok(event) => surface.post(event)?,
                        Err(e) => warn!("Ignoring unreadable host event: {}", e),
                    }
                }
                Ok(None) => {
                    info!("Host stream closed");
                    break;
                }
                Err(e) => {
                    error!("Failed to read host stream: {}", e);
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    surface.flush().await?;
    surface.shutdown().await?;

    if let Some(printer) = printer {
        if let Err(e) = printer.await {
            error!("Snapshot printer failed: {}", e);
        }
    }

    info!("Display surface shutdown complete");
    Ok(())
}
