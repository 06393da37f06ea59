//! # Streamer Configuration
//!
//! Builder-based configuration for the audio streamer. The builder fails fast
//! when a required host capability is missing.
//!
//! ## Required Dependencies
//!
//! - `MediaEngineFactory` - creates the platform media engine for each session
//! - `AudioFocusManager` - platform audio focus arbiter (desktop default:
//!   `DesktopAudioFocus` with the `desktop-shims` feature)
//!
//! ## Optional Dependencies
//!
//! - `DeviceInfoProvider` - device identity for the default HTTP user agent
//!   (desktop default: `DesktopDeviceInfo`)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::StreamerConfig;
//! use std::sync::Arc;
//!
//! let config = StreamerConfig::builder()
//!     .engine_factory(Arc::new(MyEngineFactory))
//!     .audio_focus(Arc::new(MyAudioFocus))
//!     .status_event_name("AudioStreamerStatusChanged")
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{
    AudioFocusManager, BufferingPolicy, DeviceInfoProvider, MediaEngineFactory,
    TrackSelectionPolicy,
};
use std::sync::Arc;

/// Default name of the host event carrying status changes.
pub const DEFAULT_STATUS_EVENT_NAME: &str = "AudioStreamerStatusChanged";

/// Upper bound for the event channel capacity.
const MAX_EVENT_BUFFER_SIZE: usize = 65_536;

/// Audio streamer configuration.
///
/// Use [`StreamerConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct StreamerConfig {
    /// Factory for the platform media engine (required)
    pub engine_factory: Arc<dyn MediaEngineFactory>,

    /// Platform audio focus arbiter (required, desktop default available)
    pub audio_focus: Arc<dyn AudioFocusManager>,

    /// Device identity used for the default user agent
    pub device_info: Option<Arc<dyn DeviceInfoProvider>>,

    /// Explicit HTTP user agent; overrides the device-derived one
    pub user_agent: Option<String>,

    /// Name of the host event emitted on every status change
    pub status_event_name: String,

    /// Capacity of the event broadcast channel
    pub event_buffer_size: usize,

    pub track_selection: TrackSelectionPolicy,

    pub buffering: BufferingPolicy,
}

impl std::fmt::Debug for StreamerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamerConfig")
            .field("engine_factory", &"MediaEngineFactory { ... }")
            .field("audio_focus", &"AudioFocusManager { ... }")
            .field(
                "device_info",
                &self
                    .device_info
                    .as_ref()
                    .map(|_| "DeviceInfoProvider { ... }"),
            )
            .field("user_agent", &self.user_agent)
            .field("status_event_name", &self.status_event_name)
            .field("event_buffer_size", &self.event_buffer_size)
            .field("track_selection", &self.track_selection)
            .field("buffering", &self.buffering)
            .finish()
    }
}

impl StreamerConfig {
    pub fn builder() -> StreamerConfigBuilder {
        StreamerConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Event buffer size is within `1..=65536`
    /// - Status event name is not empty
    /// - A user agent override, if present, is not empty
    /// - Buffering thresholds are consistent with each other
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > MAX_EVENT_BUFFER_SIZE {
            return Err(Error::Config(format!(
                "Event buffer size exceeds maximum of {}",
                MAX_EVENT_BUFFER_SIZE
            )));
        }

        if self.status_event_name.trim().is_empty() {
            return Err(Error::Config(
                "Status event name cannot be empty".to_string(),
            ));
        }

        if let Some(ref ua) = self.user_agent {
            if ua.trim().is_empty() {
                return Err(Error::Config("User agent cannot be empty".to_string()));
            }
        }

        let buffering = &self.buffering;
        if buffering.min_buffer > buffering.max_buffer {
            return Err(Error::Config(
                "Buffering policy: min_buffer exceeds max_buffer".to_string(),
            ));
        }

        if buffering.buffer_for_playback > buffering.max_buffer
            || buffering.buffer_for_playback_after_rebuffer > buffering.max_buffer
        {
            return Err(Error::Config(
                "Buffering policy: playback thresholds exceed max_buffer".to_string(),
            ));
        }

        Ok(())
    }
}

fn engine_factory_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "MediaEngineFactory".to_string(),
        message: "MediaEngineFactory implementation is required to play streams. \
                 Android: inject an ExoPlayer-backed factory. \
                 Desktop: inject a factory wrapping the native media backend."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_audio_focus() -> Result<Arc<dyn AudioFocusManager>> {
    use bridge_desktop::DesktopAudioFocus;

    let focus: Arc<dyn AudioFocusManager> = Arc::new(DesktopAudioFocus::new());
    Ok(focus)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_audio_focus() -> Result<Arc<dyn AudioFocusManager>> {
    Err(Error::CapabilityMissing {
        capability: "AudioFocusManager".to_string(),
        message: "AudioFocusManager implementation is required for playback. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default DesktopAudioFocus. \
                 Mobile: inject the platform audio focus service."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_device_info() -> Option<Arc<dyn DeviceInfoProvider>> {
    use bridge_desktop::DesktopDeviceInfo;

    let info: Arc<dyn DeviceInfoProvider> = Arc::new(DesktopDeviceInfo::new());
    Some(info)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_device_info() -> Option<Arc<dyn DeviceInfoProvider>> {
    None
}

/// Builder for [`StreamerConfig`].
#[derive(Default)]
pub struct StreamerConfigBuilder {
    engine_factory: Option<Arc<dyn MediaEngineFactory>>,
    audio_focus: Option<Arc<dyn AudioFocusManager>>,
    device_info: Option<Arc<dyn DeviceInfoProvider>>,
    user_agent: Option<String>,
    status_event_name: Option<String>,
    event_buffer_size: Option<usize>,
    track_selection: TrackSelectionPolicy,
    buffering: BufferingPolicy,
}

impl StreamerConfigBuilder {
    /// Sets the media engine factory (required).
    pub fn engine_factory(mut self, factory: Arc<dyn MediaEngineFactory>) -> Self {
        self.engine_factory = Some(factory);
        self
    }

    /// Sets the audio focus manager.
    ///
    /// If not provided, `DesktopAudioFocus` is used when the `desktop-shims`
    /// feature is enabled.
    pub fn audio_focus(mut self, focus: Arc<dyn AudioFocusManager>) -> Self {
        self.audio_focus = Some(focus);
        self
    }

    /// Sets the device identity provider used for the default user agent.
    pub fn device_info(mut self, provider: Arc<dyn DeviceInfoProvider>) -> Self {
        self.device_info = Some(provider);
        self
    }

    /// Overrides the HTTP user agent sent with stream requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the host event name for status changes.
    ///
    /// Default: `"AudioStreamerStatusChanged"`
    pub fn status_event_name(mut self, name: impl Into<String>) -> Self {
        self.status_event_name = Some(name.into());
        self
    }

    /// Default: 100
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    pub fn track_selection(mut self, policy: TrackSelectionPolicy) -> Self {
        self.track_selection = policy;
        self
    }

    pub fn buffering(mut self, policy: BufferingPolicy) -> Self {
        self.buffering = policy;
        self
    }

    /// Builds and validates the final `StreamerConfig`.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when no engine factory is set, or no
    ///   audio focus manager is set and no desktop default is available
    /// - [`Error::Config`] when validation fails
    pub fn build(self) -> Result<StreamerConfig> {
        let engine_factory = self
            .engine_factory
            .ok_or_else(engine_factory_missing_error)?;

        let audio_focus = match self.audio_focus {
            Some(focus) => focus,
            None => provide_default_audio_focus()?,
        };

        let device_info = self.device_info.or_else(provide_default_device_info);

        let config = StreamerConfig {
            engine_factory,
            audio_focus,
            device_info,
            user_agent: self.user_agent,
            status_event_name: self
                .status_event_name
                .unwrap_or_else(|| DEFAULT_STATUS_EVENT_NAME.to_string()),
            event_buffer_size: self
                .event_buffer_size
                .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
            track_selection: self.track_selection,
            buffering: self.buffering,
        };

        config.validate()?;

        Ok(config)
    }
}
