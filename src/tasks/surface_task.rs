//! Display surface event loop

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::DeferredTask;
use crate::state::SurfaceState;

/// Messages delivered to the surface task by its handle
#[derive(Debug)]
pub enum Inbound {
    /// A host event, routed by the dispatcher
    Event(Value),
    /// Acknowledged once every earlier inbound message has been handled
    Flush(oneshot::Sender<()>),
}

/// Own the surface state and apply host events and deferred tasks one at a time.
///
/// Runs until shutdown is requested, its shutdown sender is dropped, or every
/// inbound sender is gone.
pub async fn surface_task(
    mut state: SurfaceState,
    mut inbound: mpsc::UnboundedReceiver<Inbound>,
    mut deferred: mpsc::UnboundedReceiver<DeferredTask>,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!("Starting display surface task");

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("Display surface shutdown requested");
                break;
            }

            // The scheduler keeps a sender alive inside `state`, so this never yields None
            Some(task) = deferred.recv() => {
                state.fire(task);
            }

            message = inbound.recv() => match message {
                Some(Inbound::Event(event)) => state.handle_event(&event),
                Some(Inbound::Flush(ack)) => {
                    if ack.send(()).is_err() {
                        debug!("Flush requester went away");
                    }
                }
                None => {
                    info!("All surface handles dropped");
                    break;
                }
            },
        }
    }

    info!(
        "Display surface task stopped with {} timer(s) on screen",
        state.store().len()
    );
}
