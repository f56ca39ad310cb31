//! Signal handling for graceful shutdown of the host harness

use futures::{future, stream::StreamExt};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::{error, info};

/// Resolve once SIGTERM or SIGINT arrives.
///
/// If the handler cannot be installed the error is logged and the future never
/// resolves, so the harness keeps running until the host stream closes.
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to install signal handler: {}", e);
            return future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}
