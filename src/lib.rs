//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-service` and, through it, `core-playback` and the
//! desktop bridge). Host applications can depend on `audio-streamer-workspace`
//! and enable `desktop-shims` without wiring each crate individually.

#[cfg(feature = "desktop-shims")]
pub use core_service::{bootstrap_desktop, AudioStreamer, HostEvent, HostEventStream};
