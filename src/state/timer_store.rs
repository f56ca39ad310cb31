//! Timer store: the sole owner of timer records

use std::{collections::HashMap, time::Duration};

use chrono::Utc;
use tracing::debug;

use super::{DisplayId, Phase, Snapshot, TimerRecord, TimerSpec, TimerUpdate};

/// Fade window used when a hide message does not name one
pub const DEFAULT_FADE_OUT: Duration = Duration::from_millis(500);

/// A removal the caller must schedule after a successful retire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retirement {
    pub display_id: DisplayId,
    pub generation: u64,
    pub delay: Duration,
}

/// Mapping from display id to timer record, iterated in insertion order
#[derive(Debug)]
pub struct TimerStore {
    records: HashMap<DisplayId, TimerRecord>,
    order: Vec<DisplayId>,
    next_generation: u64,
    revision: u64,
    default_fade_out: Duration,
}

impl TimerStore {
    pub fn new() -> Self {
        Self::with_default_fade_out(DEFAULT_FADE_OUT)
    }

    pub fn with_default_fade_out(default_fade_out: Duration) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            next_generation: 0,
            revision: 0,
            default_fade_out,
        }
    }

    /// Insert or replace the record for `spec.display_id`.
    ///
    /// A replaced record keeps its slot in [`TimerStore::list`]. Returns the
    /// generation of the new record, which the caller uses to schedule the
    /// fade-in.
    pub fn create(&mut self, spec: TimerSpec) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let record = TimerRecord::new(spec, generation);
        let display_id = record.display_id.clone();

        if self.records.insert(display_id.clone(), record).is_some() {
            debug!("Recreated timer {} (generation {})", display_id, generation);
        } else {
            debug!("Created timer {} (generation {})", display_id, generation);
            self.order.push(display_id);
        }

        self.touch();
        generation
    }

    /// Fade a freshly created record in.
    ///
    /// Only applies while the record with this generation is still entering,
    /// so a hide that landed before the frame boundary is not undone.
    pub fn reveal(&mut self, display_id: &DisplayId, generation: u64) -> bool {
        let Some(record) = self.records.get_mut(display_id) else {
            return false;
        };
        if record.generation != generation || record.phase != Phase::Entering {
            return false;
        }

        record.opacity = 1.0;
        record.phase = Phase::Visible;
        self.touch();
        true
    }

    /// Apply a partial update; unknown display ids are ignored
    pub fn update(&mut self, update: TimerUpdate) -> bool {
        let Some(record) = self.records.get_mut(&update.display_id) else {
            debug!("Ignoring update for unknown timer {}", update.display_id);
            return false;
        };

        record.set_time_left(update.time_left);
        if let Some(flash) = update.flash {
            record.is_flashing = flash;
        }
        if let Some(color) = update.flash_color.filter(|color| !color.is_empty()) {
            record.flash_color = color;
        }

        self.touch();
        true
    }

    /// Start fading a record out.
    ///
    /// The record stays listed with opacity 0 until the returned retirement is
    /// carried out through [`TimerStore::remove`].
    pub fn retire(
        &mut self,
        display_id: &DisplayId,
        fade_out: Option<Duration>,
    ) -> Option<Retirement> {
        let Some(record) = self.records.get_mut(display_id) else {
            debug!("Ignoring hide for unknown timer {}", display_id);
            return None;
        };

        record.opacity = 0.0;
        record.phase = Phase::Retiring;
        let retirement = Retirement {
            display_id: display_id.clone(),
            generation: record.generation,
            delay: fade_out.unwrap_or(self.default_fade_out),
        };

        self.touch();
        Some(retirement)
    }

    /// Delete a record, but only if it is still the generation being retired
    pub fn remove(&mut self, display_id: &DisplayId, generation: u64) -> bool {
        match self.records.get(display_id) {
            Some(record) if record.generation == generation => {}
            Some(record) => {
                debug!(
                    "Keeping timer {}: generation {} replaced {}",
                    display_id, record.generation, generation
                );
                return false;
            }
            None => return false,
        }

        self.records.remove(display_id);
        self.order.retain(|id| id != display_id);
        debug!("Removed timer {} (generation {})", display_id, generation);
        self.touch();
        true
    }

    pub fn get(&self, display_id: &DisplayId) -> Option<&TimerRecord> {
        self.records.get(display_id)
    }

    /// Records in display order
    pub fn list(&self) -> impl Iterator<Item = &TimerRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            taken_at: Utc::now(),
            timers: self.list().cloned().collect(),
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::new()
    }
}
