//! # Playback Controller Module
//!
//! Drives a host-supplied media engine and reduces its callbacks into a
//! small playback status machine.
//!
//! ## Overview
//!
//! This module handles:
//! - Transport commands (set URL with optional start offset, play, pause,
//!   stop, seek) and position/duration queries
//! - Reduction of engine state, loading, and error callbacks to
//!   [`PlaybackStatus`](core_runtime::events::PlaybackStatus)
//! - Audio focus acquisition on playback and forced stop on focus loss
//! - One status event per status assignment, published on the event bus
//!
//! Decoding, buffering, and network I/O belong to the engine behind
//! [`MediaEngine`](bridge_traits::MediaEngine).

pub mod controller;
pub mod error;
pub mod source;
pub mod status;
pub mod user_agent;

pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use status::{EngineSignal, Transition};
