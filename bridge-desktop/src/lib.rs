//! # Desktop Bridge Implementations
//!
//! Default implementations of host bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! Desktop operating systems have no audio focus arbiter and no device model
//! registry, so this crate provides stand-ins:
//! - `AudioFocusManager` that always grants focus and lets the host inject
//!   focus changes (e.g. from a media-key daemon or a test harness)
//! - `DeviceInfoProvider` built from compile-time target information and,
//!   on Linux, the running kernel release
//!
//! The media engine itself is always supplied by the host.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopAudioFocus, DesktopDeviceInfo};
//! use std::sync::Arc;
//!
//! let config = StreamerConfig::builder()
//!     .engine_factory(Arc::new(MyEngineFactory))
//!     .audio_focus(Arc::new(DesktopAudioFocus::new()))
//!     .device_info(Arc::new(DesktopDeviceInfo::new()))
//!     .build()?;
//! ```

mod audio_focus;
mod device;

pub use audio_focus::DesktopAudioFocus;
pub use device::DesktopDeviceInfo;
