//! # Status Reduction
//!
//! Pure mapping from media engine callbacks to [`PlaybackStatus`].
//!
//! The engine reports through two independent channels, player state and
//! loading, which may race and repeat each other. Both are reduced here
//! without deduplication; every reduced status is assigned and emitted.
//!
//! | Signal                     | Session                 | Status      |
//! |----------------------------|-------------------------|-------------|
//! | state `Idle`               | any                     | `STOPPED`   |
//! | state `Buffering`          | any                     | `BUFFERING` |
//! | state `Ready`              | play-when-ready         | `PLAYING` (+ focus request) |
//! | state `Ready`              | paused or none          | `PAUSED`    |
//! | state `Ended`              | any                     | `FINISHED`  |
//! | player error               | any                     | `ERROR`     |
//! | loading `true`             | any                     | `BUFFERING` |
//! | loading `false`            | play-when-ready         | `PLAYING`   |
//! | loading `false`            | paused                  | `PAUSED`    |
//! | loading `false`            | none                    | `STOPPED`   |
//! | load error                 | any                     | `ERROR`     |

use bridge_traits::EngineState;
use core_runtime::events::PlaybackStatus;

/// A callback delivered by the media engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSignal {
    StateChanged {
        play_when_ready: bool,
        state: EngineState,
    },
    LoadingChanged {
        is_loading: bool,
    },
    PlayerError(String),
    LoadError(String),
}

impl EngineSignal {
    pub fn name(&self) -> &'static str {
        match self {
            EngineSignal::StateChanged { .. } => "state_changed",
            EngineSignal::LoadingChanged { .. } => "loading_changed",
            EngineSignal::PlayerError(_) => "player_error",
            EngineSignal::LoadError(_) => "load_error",
        }
    }
}

/// Result of reducing one engine signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: PlaybackStatus,
    /// Audio focus must be requested on entering `PLAYING` from a ready engine.
    pub request_focus: bool,
}

impl Transition {
    fn to(status: PlaybackStatus) -> Self {
        Self {
            status,
            request_focus: false,
        }
    }
}

/// Reduce an engine signal to the next status.
///
/// `play_when_ready` is the live flag of the active session, or `None` when
/// no session exists. The flag carried by a state callback is not consulted;
/// the engine's current flag reflects the latest `play`/`pause`.
pub fn reduce(signal: &EngineSignal, play_when_ready: Option<bool>) -> Transition {
    match signal {
        EngineSignal::StateChanged { state, .. } => match state {
            EngineState::Idle => Transition::to(PlaybackStatus::Stopped),
            EngineState::Buffering => Transition::to(PlaybackStatus::Buffering),
            EngineState::Ready if play_when_ready == Some(true) => Transition {
                status: PlaybackStatus::Playing,
                request_focus: true,
            },
            EngineState::Ready => Transition::to(PlaybackStatus::Paused),
            EngineState::Ended => Transition::to(PlaybackStatus::Finished),
        },
        EngineSignal::LoadingChanged { is_loading: true } => {
            Transition::to(PlaybackStatus::Buffering)
        }
        EngineSignal::LoadingChanged { is_loading: false } => match play_when_ready {
            Some(true) => Transition::to(PlaybackStatus::Playing),
            Some(false) => Transition::to(PlaybackStatus::Paused),
            None => Transition::to(PlaybackStatus::Stopped),
        },
        EngineSignal::PlayerError(_) | EngineSignal::LoadError(_) => {
            Transition::to(PlaybackStatus::Error)
        }
    }
}

/// Whether `next` may be assigned while no session is active.
///
/// Only statuses that imply no engine are accepted, and none of them may
/// replace `AUDIOFOCUS_LOST`.
pub fn admits_without_session(current: PlaybackStatus, next: PlaybackStatus) -> bool {
    next.is_sessionless()
        && next != PlaybackStatus::AudioFocusLost
        && current != PlaybackStatus::AudioFocusLost
}
