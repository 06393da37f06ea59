//! Media engine bridge traits and supporting types.
//!
//! The playback core never decodes, demuxes, or fetches audio itself. Host
//! platforms supply a native media engine (e.g. a platform player library)
//! behind [`MediaEngineFactory`] / [`MediaEngine`], and the core drives it
//! through a small transport surface while observing its callbacks.
//!
//! Engine callbacks are plain closures registered through [`EngineCallbacks`].
//! They may be invoked from any engine-internal thread; implementations of the
//! core are responsible for serializing them.

use crate::{
    error::Result,
    platform::{PlatformSend, PlatformSendSync},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Microseconds per second, the time base used by clipping bounds.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Unique identifier for one engine instance owned by the playback core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackSessionId(Uuid);

impl PlaybackSessionId {
    /// Generate a new session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct an identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlaybackSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaybackSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback state reported by the engine's state-changed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No media prepared, or the engine was stopped.
    Idle,
    /// Not enough data buffered to play from the current position.
    Buffering,
    /// Able to play immediately from the current position.
    Ready,
    /// Reached the end of the media.
    Ended,
}

/// Media source description handed to [`MediaEngine::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Progressive (extractor-based) stream fetched over HTTP(S) or read from a
    /// local URI.
    Progressive {
        /// Source URI as supplied by the host.
        uri: String,
        /// User agent for the HTTP data source.
        user_agent: String,
    },
    /// A view over another source restricted to a sub-range of its timeline.
    Clipping {
        /// Wrapped source.
        source: Box<MediaSource>,
        /// Clip start in microseconds.
        start_position_us: i64,
        /// Clip end in microseconds; `None` plays through to the natural end.
        end_position_us: Option<i64>,
    },
}

impl MediaSource {
    /// URI of the innermost source.
    pub fn uri(&self) -> &str {
        match self {
            MediaSource::Progressive { uri, .. } => uri,
            MediaSource::Clipping { source, .. } => source.uri(),
        }
    }

    /// Effective playback start in microseconds (zero when unclipped).
    pub fn start_position_us(&self) -> i64 {
        match self {
            MediaSource::Progressive { .. } => 0,
            MediaSource::Clipping {
                start_position_us, ..
            } => *start_position_us,
        }
    }

    /// Returns `true` if playback is restricted to a clipped range.
    pub fn is_clipped(&self) -> bool {
        matches!(self, MediaSource::Clipping { .. })
    }
}

/// Track selection parameters passed to the engine at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelectionPolicy {
    /// Upper bound on the selected audio bitrate in bits per second.
    #[serde(default)]
    pub max_audio_bitrate: Option<u32>,
    /// Preferred audio language (BCP 47 tag).
    #[serde(default)]
    pub preferred_audio_language: Option<String>,
}

/// Buffering thresholds passed to the engine at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferingPolicy {
    /// Minimum media duration the engine tries to keep buffered.
    pub min_buffer: Duration,
    /// Maximum media duration the engine buffers ahead.
    pub max_buffer: Duration,
    /// Buffered duration required before playback starts.
    pub buffer_for_playback: Duration,
    /// Buffered duration required before playback resumes after a rebuffer.
    pub buffer_for_playback_after_rebuffer: Duration,
}

impl Default for BufferingPolicy {
    fn default() -> Self {
        Self {
            min_buffer: Duration::from_millis(15_000),
            max_buffer: Duration::from_millis(30_000),
            buffer_for_playback: Duration::from_millis(2_500),
            buffer_for_playback_after_rebuffer: Duration::from_millis(5_000),
        }
    }
}

/// Invoked with `(play_when_ready, state)` whenever either value changes.
pub type StateChangedCallback = Arc<dyn Fn(bool, EngineState) + Send + Sync>;

/// Invoked when the engine starts or stops loading media data.
pub type LoadingChangedCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Invoked with a human-readable description of a playback or load failure.
pub type ErrorCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Independently registered handlers for every engine callback channel.
#[derive(Clone)]
pub struct EngineCallbacks {
    pub on_state_changed: StateChangedCallback,
    pub on_loading_changed: LoadingChangedCallback,
    pub on_player_error: ErrorCallback,
    pub on_load_error: ErrorCallback,
}

impl fmt::Debug for EngineCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineCallbacks").finish_non_exhaustive()
    }
}

/// One native player instance.
///
/// All methods must return promptly: preparation, buffering, and failures are
/// reported later through the registered [`EngineCallbacks`]. Engines must not
/// assume callbacks are consumed synchronously.
pub trait MediaEngine: PlatformSend {
    /// Register the callback handlers for this instance.
    fn add_listener(&mut self, callbacks: EngineCallbacks);

    /// Begin asynchronous preparation of `source`.
    fn prepare(&mut self, source: MediaSource);

    /// Set the intent to play as soon as enough data is buffered.
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    /// Current play-when-ready intent.
    fn play_when_ready(&self) -> bool;

    /// Seek to an absolute position in milliseconds.
    fn seek_to(&mut self, position_ms: i64);

    /// Current playback position in milliseconds.
    fn current_position_ms(&self) -> i64;

    /// Total media duration in milliseconds, or `None` while unknown.
    fn duration_ms(&self) -> Option<i64>;

    /// Stop playback. The instance is not reused afterwards.
    fn stop(&mut self);

    /// Release native decoder and output resources.
    fn release(&mut self) {}
}

/// Constructs [`MediaEngine`] instances on demand.
pub trait MediaEngineFactory: PlatformSendSync {
    fn create(
        &self,
        track_selection: &TrackSelectionPolicy,
        buffering: &BufferingPolicy,
    ) -> Result<Box<dyn MediaEngine>>;
}
