//! Background tasks module
//!
//! The surface event loop and the deferred-task scheduler that feeds it.

pub mod scheduler;
pub mod surface_task;

pub use scheduler::{DeferredTask, Scheduler};
pub use surface_task::{surface_task, Inbound};
