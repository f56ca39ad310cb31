//! Display surface lifecycle: start, feed, observe and tear down

use std::sync::Arc;

use serde_json::Value;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};

use crate::{
    config::SurfaceConfig,
    error::SurfaceError,
    services::SoundPlayer,
    state::{Snapshot, SurfaceState},
    tasks::{surface_task, Inbound, Scheduler},
};

pub struct DisplaySurface;

impl DisplaySurface {
    /// Spawn the surface task and return the handle that controls it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: SurfaceConfig, sound: Arc<dyn SoundPlayer>) -> SurfaceHandle {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (scheduler, deferred_rx) = Scheduler::channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::empty());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let state = SurfaceState::new(config, scheduler, sound, snapshot_tx);
        let task = tokio::spawn(surface_task(state, inbound_rx, deferred_rx, shutdown_rx));

        SurfaceHandle {
            inbound: inbound_tx,
            snapshots: snapshot_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Handle to a running display surface. Dropping it stops the surface.
#[derive(Debug)]
pub struct SurfaceHandle {
    inbound: mpsc::UnboundedSender<Inbound>,
    snapshots: watch::Receiver<Snapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SurfaceHandle {
    /// Deliver one host event. Never blocks.
    pub fn post(&self, event: Value) -> Result<(), SurfaceError> {
        self.inbound
            .send(Inbound::Event(event))
            .map_err(|_| SurfaceError::Stopped)
    }

    /// Wait until every event posted so far has been handled
    pub async fn flush(&self) -> Result<(), SurfaceError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.inbound
            .send(Inbound::Flush(ack_tx))
            .map_err(|_| SurfaceError::Stopped)?;
        ack_rx.await.map_err(|_| SurfaceError::Stopped)
    }

    /// Receiver notified with a fresh snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop the surface task and wait for it to finish.
    ///
    /// Deferred tasks still pending are discarded.
    pub async fn shutdown(mut self) -> Result<(), SurfaceError> {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have stopped on its own
            let _ = shutdown.send(());
        }
        match self.task.take() {
            Some(task) => task.await.map_err(SurfaceError::from),
            None => Ok(()),
        }
    }
}
