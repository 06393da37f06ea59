//! Audio focus stand-in for desktop hosts

use bridge_traits::audio_focus::{
    AudioFocusChange, AudioFocusListener, AudioFocusManager, AudioFocusRequestResult,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Desktop audio focus manager.
///
/// Every request is granted. The most recent listener is retained so that
/// focus changes can be injected with [`DesktopAudioFocus::notify`].
#[derive(Clone, Default)]
pub struct DesktopAudioFocus {
    listener: Arc<Mutex<Option<AudioFocusListener>>>,
}

impl DesktopAudioFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a focus change to the current holder.
    ///
    /// Returns `false` if nobody holds focus.
    pub fn notify(&self, change: AudioFocusChange) -> bool {
        // Clone out of the lock; the listener may call back into this manager.
        let listener = self.listener.lock().clone();
        match listener {
            Some(listener) => {
                debug!(?change, "Dispatching audio focus change");
                listener(change);
                true
            }
            None => {
                debug!(?change, "Audio focus change with no holder");
                false
            }
        }
    }

    /// Returns `true` while a listener holds focus.
    pub fn has_holder(&self) -> bool {
        self.listener.lock().is_some()
    }
}

impl AudioFocusManager for DesktopAudioFocus {
    fn request_focus(&self, listener: AudioFocusListener) -> AudioFocusRequestResult {
        *self.listener.lock() = Some(listener);
        debug!("Audio focus granted");
        AudioFocusRequestResult::Granted
    }

    fn abandon_focus(&self) {
        self.listener.lock().take();
        debug!("Audio focus abandoned");
    }
}
