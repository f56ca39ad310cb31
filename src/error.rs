//! Error types shared across the display surface

use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

/// Reasons an inbound host event was dropped by the dispatcher
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("event payload is not a JSON object")]
    NotAnObject,
    #[error("event has no action")]
    MissingAction,
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("`{action}` message has no usable displayId")]
    MissingDisplayId { action: &'static str },
}

/// Failures reported by a sound player
#[derive(Debug, Error)]
pub enum SoundError {
    #[error("audio asset not found: {}", .0.display())]
    MissingAsset(PathBuf),
    #[error("failed to launch sound command `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sound command `{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Errors surfaced by a [`crate::SurfaceHandle`]
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("display surface has stopped")]
    Stopped,
    #[error("display surface task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
