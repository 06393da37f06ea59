//! Host-facing audio streamer.

use crate::error::Result;
use crate::events::HostEventStream;
use core_playback::{PlaybackController, PlaybackError};
use core_runtime::config::StreamerConfig;
use core_runtime::events::PlaybackStatus;
use tracing::{info, warn};

/// Name under which the streamer is registered with the host.
pub const MODULE_NAME: &str = "AudioStreamer";

/// Host façade over the playback controller.
///
/// Commands never fail towards the host. Engine problems surface as status
/// events, and a command issued after [`shutdown`](Self::shutdown) is logged
/// and dropped. Times are exchanged as `f64` seconds.
#[derive(Debug)]
pub struct AudioStreamer {
    controller: PlaybackController,
    status_event_name: String,
}

impl AudioStreamer {
    /// Spawn the controller on the current Tokio runtime.
    pub fn new(config: StreamerConfig) -> Result<Self> {
        let status_event_name = config.status_event_name.clone();
        let controller = PlaybackController::spawn(config)?;
        info!(module = MODULE_NAME, event = %status_event_name, "Audio streamer ready");

        Ok(Self {
            controller,
            status_event_name,
        })
    }

    pub fn module_name(&self) -> &'static str {
        MODULE_NAME
    }

    pub fn status_event_name(&self) -> &str {
        &self.status_event_name
    }

    pub async fn set_url(&self, uri: &str) {
        self.swallow("set_url", self.controller.set_url(uri).await);
    }

    pub async fn set_url_with_offset(&self, uri: &str, offset_secs: f64) {
        self.swallow(
            "set_url_with_offset",
            self.controller.set_url_with_offset(uri, offset_secs).await,
        );
    }

    pub async fn play(&self) {
        self.swallow("play", self.controller.play().await);
    }

    pub async fn pause(&self) {
        self.swallow("pause", self.controller.pause().await);
    }

    pub async fn stop(&self) {
        self.swallow("stop", self.controller.stop().await);
    }

    pub async fn seek_to_time(&self, time: f64) {
        self.swallow("seek_to_time", self.controller.seek_to_time(time).await);
    }

    /// Position in whole seconds.
    pub async fn current_time(&self) -> f64 {
        self.swallow("current_time", self.controller.current_time().await)
            .unwrap_or(0) as f64
    }

    /// Duration in whole seconds.
    pub async fn duration(&self) -> f64 {
        self.swallow("duration", self.controller.duration().await)
            .unwrap_or(0) as f64
    }

    /// One of the seven status strings. A closed streamer reports `STOPPED`.
    pub async fn status(&self) -> String {
        self.swallow("status", self.controller.status().await)
            .unwrap_or(PlaybackStatus::Stopped)
            .as_str()
            .to_string()
    }

    /// Subscribe to named status events.
    pub fn events(&self) -> HostEventStream {
        HostEventStream::new(self.controller.subscribe(), self.status_event_name.clone())
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Stop playback and end the controller. Safe to call more than once.
    pub async fn shutdown(&self) {
        if self.controller.is_closed() {
            return;
        }
        self.swallow("shutdown", self.controller.shutdown().await);
    }

    fn swallow<T>(&self, command: &str, result: core_playback::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(PlaybackError::ControllerClosed) => {
                warn!(command, "Audio streamer is shut down; command ignored");
                None
            }
            Err(e) => {
                warn!(command, error = %e, "Audio streamer command failed");
                None
            }
        }
    }
}
