//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the audio streamer core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus and playback status vocabulary
//!
//! ## Overview
//!
//! Every other core crate depends on this one. It fixes the error type used
//! for configuration failures, the logging conventions, and the broadcast
//! channel through which status changes reach the host.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{StreamerConfig, StreamerConfigBuilder, DEFAULT_STATUS_EVENT_NAME};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, EventStream, PlaybackEvent, PlaybackStatus};
