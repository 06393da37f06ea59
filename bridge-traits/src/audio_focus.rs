//! Audio focus arbitration.
//!
//! Mobile platforms arbitrate exclusive audio output between applications.
//! The playback core requests focus when playback starts and reacts to focus
//! changes pushed by the platform at any time afterwards.

use crate::platform::PlatformSendSync;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Focus change pushed by the platform arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioFocusChange {
    /// Focus (re)gained.
    Gain,
    /// Focus lost for an unbounded time; playback must stop.
    Loss,
    /// Focus lost briefly (e.g. a notification sound).
    LossTransient,
    /// Focus lost briefly; playback may continue at reduced volume.
    LossTransientCanDuck,
}

impl AudioFocusChange {
    /// Returns `true` for a permanent loss of focus.
    pub fn is_permanent_loss(&self) -> bool {
        matches!(self, AudioFocusChange::Loss)
    }
}

/// Outcome of a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioFocusRequestResult {
    Granted,
    Denied,
}

impl AudioFocusRequestResult {
    pub fn is_granted(&self) -> bool {
        matches!(self, AudioFocusRequestResult::Granted)
    }
}

/// Handler receiving focus changes. May be invoked from any platform thread,
/// including synchronously from within [`AudioFocusManager::request_focus`].
pub type AudioFocusListener = Arc<dyn Fn(AudioFocusChange) + Send + Sync>;

/// Platform audio focus arbiter.
pub trait AudioFocusManager: PlatformSendSync {
    /// Request exclusive, long-lived focus for music playback. `listener`
    /// receives every subsequent focus change.
    fn request_focus(&self, listener: AudioFocusListener) -> AudioFocusRequestResult;

    /// Give up focus previously requested.
    fn abandon_focus(&self) {}
}
