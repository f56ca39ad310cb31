//! Immutable view of the timer store handed to the rendering layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TimerRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Store revision this snapshot was taken at
    pub revision: u64,
    pub taken_at: DateTime<Utc>,
    /// Records in display order
    pub timers: Vec<TimerRecord>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            revision: 0,
            taken_at: Utc::now(),
            timers: Vec::new(),
        }
    }

    pub fn get(&self, display_id: &str) -> Option<&TimerRecord> {
        self.timers
            .iter()
            .find(|timer| timer.display_id.as_str() == display_id)
    }

    /// Display ids in render order
    pub fn display_ids(&self) -> Vec<&str> {
        self.timers
            .iter()
            .map(|timer| timer.display_id.as_str())
            .collect()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
