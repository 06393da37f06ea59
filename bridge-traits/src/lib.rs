//! # Host Bridge Traits
//!
//! Capability traits that each host platform implements for the audio
//! streamer core.
//!
//! ## Overview
//!
//! The core owns the playback status state machine but none of the heavy
//! lifting: decoding, buffering, and network I/O belong to a native media
//! engine, and audio output arbitration belongs to the platform. This crate
//! defines the contract between the core and those collaborators.
//!
//! ## Traits
//!
//! ### Playback
//! - [`MediaEngineFactory`](playback::MediaEngineFactory) - Constructs native player instances
//! - [`MediaEngine`](playback::MediaEngine) - Transport surface of one player instance
//!
//! ### Platform Integration
//! - [`AudioFocusManager`](audio_focus::AudioFocusManager) - Exclusive audio output arbitration
//! - [`DeviceInfoProvider`](device::DeviceInfoProvider) - Runtime/device identity for user agents
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Media engine |
//! |----------|---------------------|--------------|
//! | Desktop  | `bridge-desktop`    | Host supplied |
//! | Android  | Host app            | Host supplied |
//! | iOS      | Host app            | Host supplied |
//!
//! ## Thread Safety
//!
//! Engine callbacks and focus listeners may fire on arbitrary threads, so all
//! capability traits carry `Send`/`Sync` bounds on native targets through the
//! [`platform`] markers.

pub mod audio_focus;
pub mod device;
pub mod error;
pub mod logging;
pub mod platform;
pub mod playback;

pub use error::BridgeError;

// Re-export commonly used types
pub use audio_focus::{
    AudioFocusChange, AudioFocusListener, AudioFocusManager, AudioFocusRequestResult,
};
pub use device::{DeviceInfo, DeviceInfoProvider};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use playback::{
    BufferingPolicy, EngineCallbacks, EngineState, MediaEngine, MediaEngineFactory, MediaSource,
    PlaybackSessionId, TrackSelectionPolicy,
};
