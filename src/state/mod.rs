//! State management module
//!
//! Timer records, the store that owns them, and the surface state that ties
//! the store to scheduling and sound.

pub mod snapshot;
pub mod surface_state;
pub mod timer_record;
pub mod timer_store;

pub use snapshot::Snapshot;
pub use surface_state::SurfaceState;
pub use timer_record::{
    DisplayId, HideRequest, Phase, Position, TimeLeft, TimerRecord, TimerSpec, TimerUpdate,
    DEFAULT_FLASH_COLOR, DEFAULT_TITLE,
};
pub use timer_store::{Retirement, TimerStore, DEFAULT_FADE_OUT};
