//! Single-shot deferred tasks for fade-in and fade-out removal

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{sleep_until, Instant},
};
use tracing::debug;

use crate::state::DisplayId;

/// Work handed back to the surface task once its delay has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// Frame boundary after a create: flip opacity to 1
    FadeIn { display_id: DisplayId, generation: u64 },
    /// End of the fade window after a hide: delete the record
    Remove { display_id: DisplayId, generation: u64 },
}

/// Arranges for deferred tasks to be delivered back to the surface task.
///
/// Every scheduled task is independent and cannot be cancelled. The sleeping
/// task never touches timer state; it only sends the task into the channel the
/// surface task drains, so all mutations stay on one task.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<DeferredTask>,
}

impl Scheduler {
    /// Create a scheduler and the receiver the surface task listens on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeferredTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Deliver `task` after `delay`. Must be called from within a tokio runtime.
    pub fn schedule(&self, task: DeferredTask, delay: Duration) {
        debug!("Scheduling {:?} in {}ms", task, delay.as_millis());
        let deadline = Instant::now() + delay;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            sleep_until(deadline).await;
            if let Err(e) = tx.send(task) {
                debug!("Surface stopped before {:?} fired", e.0);
            }
        });
    }
}
