//! Surface state: the timer store wired to scheduling, sound and snapshots

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};

use super::{HideRequest, Snapshot, TimerSpec, TimerStore, TimerUpdate};
use crate::{
    api::{dispatch, MessageHandler},
    config::SurfaceConfig,
    services::{normalize_volume, trigger_sound, SoundPlayer, SoundRequest},
    tasks::{DeferredTask, Scheduler},
};

/// Everything the surface task owns. Only ever touched from that one task.
pub struct SurfaceState {
    store: TimerStore,
    scheduler: Scheduler,
    sound: Arc<dyn SoundPlayer>,
    config: SurfaceConfig,
    snapshot_tx: watch::Sender<Snapshot>,
    published_revision: u64,
}

impl SurfaceState {
    pub fn new(
        config: SurfaceConfig,
        scheduler: Scheduler,
        sound: Arc<dyn SoundPlayer>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) -> Self {
        Self {
            store: TimerStore::with_default_fade_out(config.default_fade_out),
            scheduler,
            sound,
            config,
            snapshot_tx,
            published_revision: 0,
        }
    }

    pub fn store(&self) -> &TimerStore {
        &self.store
    }

    /// Route one host event and publish the result
    pub fn handle_event(&mut self, event: &Value) {
        dispatch(self, event);
        self.publish();
    }

    /// Carry out a deferred task whose delay has elapsed
    pub fn fire(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::FadeIn {
                display_id,
                generation,
            } => {
                if self.store.reveal(&display_id, generation) {
                    debug!("Timer {} faded in", display_id);
                }
            }
            DeferredTask::Remove {
                display_id,
                generation,
            } => {
                if self.store.remove(&display_id, generation) {
                    info!("Timer {} removed after fade-out", display_id);
                }
            }
        }
        self.publish();
    }

    /// Send a snapshot to subscribers if the store changed since the last one
    fn publish(&mut self) {
        let revision = self.store.revision();
        if revision == self.published_revision {
            return;
        }
        self.published_revision = revision;
        self.snapshot_tx.send_replace(self.store.snapshot());
    }
}

impl MessageHandler for SurfaceState {
    fn show(&mut self, spec: TimerSpec) {
        let display_id = spec.display_id.clone();
        info!("Showing timer {}", display_id);
        let generation = self.store.create(spec);
        self.scheduler.schedule(
            DeferredTask::FadeIn {
                display_id,
                generation,
            },
            self.config.frame_interval,
        );
    }

    fn update(&mut self, update: TimerUpdate) {
        self.store.update(update);
    }

    fn hide(&mut self, request: HideRequest) {
        if let Some(retirement) = self.store.retire(&request.display_id, request.fade_out) {
            info!(
                "Hiding timer {} over {}ms",
                retirement.display_id,
                retirement.delay.as_millis()
            );
            self.scheduler.schedule(
                DeferredTask::Remove {
                    display_id: retirement.display_id,
                    generation: retirement.generation,
                },
                retirement.delay,
            );
        }
    }

    fn play_sound(&mut self, volume: Option<f64>) {
        let request = SoundRequest {
            asset: self.config.sound_asset.clone(),
            volume: normalize_volume(volume),
        };
        debug!("Playing sound at volume {:.2}", request.volume);
        trigger_sound(&self.sound, request);
    }
}
