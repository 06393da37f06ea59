//! Audio streamer façade and bootstrap helpers.
//!
//! This crate exposes the playback controller to a host scripting runtime:
//! transport commands take and return host-friendly types (`f64` seconds,
//! status strings), and status changes are delivered as named
//! [`HostEvent`]s. Desktop apps typically enable the `desktop-shims` feature
//! (which depends on `bridge-desktop`) and only supply a media engine.

pub mod error;
pub mod events;
pub mod streamer;

pub use error::{Result, ServiceError};
pub use events::{HostEvent, HostEventStream};
pub use streamer::{AudioStreamer, MODULE_NAME};

#[cfg(feature = "desktop-shims")]
use bridge_desktop::{DesktopAudioFocus, DesktopDeviceInfo};
#[cfg(feature = "desktop-shims")]
use bridge_traits::MediaEngineFactory;
#[cfg(feature = "desktop-shims")]
use core_runtime::config::StreamerConfig;
#[cfg(feature = "desktop-shims")]
use std::sync::Arc;

/// Convenience bootstrapper for desktop hosts.
///
/// Returns the streamer together with its [`DesktopAudioFocus`], through
/// which the host can deliver focus changes.
///
/// ```ignore
/// let (streamer, focus) = core_service::bootstrap_desktop(Arc::new(MyEngineFactory))?;
/// streamer.set_url("https://radio.example.org/live.mp3").await;
/// streamer.play().await;
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(
    engine_factory: Arc<dyn MediaEngineFactory>,
) -> Result<(AudioStreamer, DesktopAudioFocus)> {
    let focus = DesktopAudioFocus::new();
    let config = StreamerConfig::builder()
        .engine_factory(engine_factory)
        .audio_focus(Arc::new(focus.clone()))
        .device_info(Arc::new(DesktopDeviceInfo::new()))
        .build()?;

    let streamer = AudioStreamer::new(config)?;
    Ok((streamer, focus))
}
