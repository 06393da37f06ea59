//! # Playback Error Types
//!
//! Errors returned to callers of the playback controller.
//!
//! Engine failures are not errors at this level: they reduce to the `ERROR`
//! status and are reported through status events.

use thiserror::Error;

/// Errors that can occur when driving the playback controller.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The controller task has shut down; no further commands are accepted.
    #[error("Playback controller is closed")]
    ControllerClosed,

    /// The controller must be spawned from within a Tokio runtime.
    #[error("No Tokio runtime available: {0}")]
    NoRuntime(String),

    /// Invalid streamer configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlaybackError {
    /// Returns `true` if the controller can no longer accept commands.
    pub fn is_closed(&self) -> bool {
        matches!(self, PlaybackError::ControllerClosed)
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
