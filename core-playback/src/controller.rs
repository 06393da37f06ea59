//! # Playback Controller
//!
//! Owns at most one media engine session and the playback status, and
//! publishes a status event for every status assignment.
//!
//! ## Architecture
//!
//! ```text
//!  host commands ──┐
//!  engine callbacks ├──► mailbox (mpsc) ──► ControllerActor ──► EventBus
//!  focus changes ──┘                         │
//!                                            ▼
//!                                    MediaEngine / AudioFocusManager
//! ```
//!
//! A single task owns the session and status, so every mutation and its
//! event form one atomic step as seen by subscribers. Engine callbacks and
//! focus listeners only enqueue messages; they may fire on any thread,
//! including synchronously from inside an engine or focus manager call.
//!
//! Engine callbacks are tagged with the session they were registered for.
//! Callbacks from a superseded session are dropped. With no session active,
//! only statuses that imply no engine are accepted, and none of them replace
//! `AUDIOFOCUS_LOST`.
//!
//! ## Usage
//!
//! ```ignore
//! let controller = PlaybackController::spawn(config)?;
//! let mut events = controller.subscribe();
//!
//! controller.set_url("https://radio.example.org/live.mp3").await?;
//! controller.play().await?;
//!
//! while let Ok(event) = events.recv().await {
//!     println!("status: {:?}", event.status());
//! }
//! ```

use crate::error::{PlaybackError, Result};
use crate::source::build_media_source;
use crate::status::{admits_without_session, reduce, EngineSignal};
use crate::user_agent::{default_user_agent, generic_user_agent};
use bridge_traits::{
    AudioFocusChange, AudioFocusListener, AudioFocusManager, AudioFocusRequestResult,
    BufferingPolicy, EngineCallbacks, MediaEngine, MediaEngineFactory, PlaybackSessionId,
    TrackSelectionPolicy,
};
use core_runtime::config::StreamerConfig;
use core_runtime::events::{CoreEvent, EventBus, EventStream, PlaybackEvent, PlaybackStatus};
use core_runtime::logging::redact_uri;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

const MILLIS_PER_SECOND: i64 = 1000;

// ============================================================================
// Messages
// ============================================================================

type Reply<T> = oneshot::Sender<T>;

enum Command {
    SetUrl {
        uri: String,
        offset_secs: f64,
        reply: Reply<()>,
    },
    Play(Reply<()>),
    Pause(Reply<()>),
    Stop(Reply<()>),
    SeekToTime {
        time: f64,
        reply: Reply<()>,
    },
    CurrentTime(Reply<i64>),
    Duration(Reply<i64>),
    Status(Reply<PlaybackStatus>),
    Shutdown(Reply<()>),
}

enum Message {
    Command(Command),
    Engine {
        session: PlaybackSessionId,
        signal: EngineSignal,
    },
    Focus(AudioFocusChange),
}

// ============================================================================
// PlaybackController (handle)
// ============================================================================

/// Handle to the playback actor.
///
/// Commands are processed strictly in submission order, interleaved with
/// engine callbacks and focus changes in arrival order. Every method resolves
/// once the actor has handled the request, so a query observes all callbacks
/// enqueued before it.
pub struct PlaybackController {
    mailbox: mpsc::UnboundedSender<Message>,
    event_bus: EventBus,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackController {
    /// Start the controller task on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`PlaybackError::Config`] if the configuration is invalid
    /// - [`PlaybackError::NoRuntime`] if called outside a Tokio runtime
    pub fn spawn(config: StreamerConfig) -> Result<Self> {
        config.validate()?;
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::NoRuntime(e.to_string()))?;

        let (mailbox, inbox) = mpsc::unbounded_channel();
        let event_bus = EventBus::new(config.event_buffer_size);
        let actor = ControllerActor::new(&config, event_bus.clone(), mailbox.downgrade());

        info!(user_agent = %actor.user_agent, "Starting playback controller");
        let task = handle.spawn(actor.run(inbox));

        Ok(Self {
            mailbox,
            event_bus,
            task: Mutex::new(Some(task)),
        })
    }

    /// Equivalent to `set_url_with_offset(uri, 0.0)`.
    pub async fn set_url(&self, uri: &str) -> Result<()> {
        self.set_url_with_offset(uri, 0.0).await
    }

    /// Tear down any current session and start preparing `uri`, clipped to
    /// begin at `offset_secs` when positive.
    ///
    /// Status is not changed here beyond the `STOPPED` of a torn-down
    /// session; engine callbacks drive it from then on.
    pub async fn set_url_with_offset(&self, uri: &str, offset_secs: f64) -> Result<()> {
        let uri = uri.to_string();
        self.request(move |reply| Command::SetUrl {
            uri,
            offset_secs,
            reply,
        })
        .await
    }

    /// Set the engine's play-when-ready intent. Ignored without a session.
    pub async fn play(&self) -> Result<()> {
        self.request(Command::Play).await
    }

    /// Clear the engine's play-when-ready intent. Ignored without a session.
    pub async fn pause(&self) -> Result<()> {
        self.request(Command::Pause).await
    }

    /// Stop and release the session. Without a session this emits nothing.
    pub async fn stop(&self) -> Result<()> {
        self.request(Command::Stop).await
    }

    /// Seek to `time`; the engine receives `trunc(time) * 1000`.
    pub async fn seek_to_time(&self, time: f64) -> Result<()> {
        self.request(move |reply| Command::SeekToTime { time, reply })
            .await
    }

    /// Current position in whole seconds, or 0 without a session.
    pub async fn current_time(&self) -> Result<i64> {
        self.request(Command::CurrentTime).await
    }

    /// Total duration in whole seconds, or 0 without a session or while the
    /// duration is unknown.
    pub async fn duration(&self) -> Result<i64> {
        self.request(Command::Duration).await
    }

    pub async fn status(&self) -> Result<PlaybackStatus> {
        self.request(Command::Status).await
    }

    /// Subscribe to status events. Past events are not replayed.
    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.event_bus.subscribe())
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Stop any session, give up audio focus, and end the controller task.
    ///
    /// Subsequent commands fail with [`PlaybackError::ControllerClosed`].
    pub async fn shutdown(&self) -> Result<()> {
        let result = self.request(Command::Shutdown).await;
        let task = self.task.lock().take();
        if let Some(task) = task {
            task.await
                .map_err(|e| PlaybackError::Internal(format!("Controller task failed: {}", e)))?;
        }
        result
    }

    pub fn is_closed(&self) -> bool {
        self.mailbox.is_closed()
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.mailbox
            .send(Message::Command(build(reply)))
            .map_err(|_| PlaybackError::ControllerClosed)?;
        response.await.map_err(|_| PlaybackError::ControllerClosed)
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("closed", &self.is_closed())
            .field("event_bus", &self.event_bus)
            .finish()
    }
}

// ============================================================================
// ControllerActor
// ============================================================================

struct Session {
    id: PlaybackSessionId,
    engine: Box<dyn MediaEngine>,
    uri: String,
    offset_secs: f64,
}

struct ControllerActor {
    engine_factory: Arc<dyn MediaEngineFactory>,
    audio_focus: Arc<dyn AudioFocusManager>,
    track_selection: TrackSelectionPolicy,
    buffering: BufferingPolicy,
    user_agent: String,
    event_bus: EventBus,
    mailbox: mpsc::WeakUnboundedSender<Message>,
    session: Option<Session>,
    status: PlaybackStatus,
}

impl ControllerActor {
    fn new(
        config: &StreamerConfig,
        event_bus: EventBus,
        mailbox: mpsc::WeakUnboundedSender<Message>,
    ) -> Self {
        let user_agent = match (&config.user_agent, &config.device_info) {
            (Some(agent), _) => agent.clone(),
            (None, Some(provider)) => default_user_agent(&provider.device_info()),
            (None, None) => generic_user_agent(),
        };

        Self {
            engine_factory: Arc::clone(&config.engine_factory),
            audio_focus: Arc::clone(&config.audio_focus),
            track_selection: config.track_selection.clone(),
            buffering: config.buffering,
            user_agent,
            event_bus,
            mailbox,
            session: None,
            status: PlaybackStatus::Stopped,
        }
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Message>) {
        while let Some(message) = inbox.recv().await {
            match message {
                Message::Command(Command::Shutdown(reply)) => {
                    self.close();
                    let _ = reply.send(());
                    return;
                }
                Message::Command(command) => self.handle_command(command),
                Message::Engine { session, signal } => self.on_engine_signal(session, signal),
                Message::Focus(change) => self.on_focus_change(change),
            }
        }

        // Every controller handle is gone.
        self.close();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetUrl {
                uri,
                offset_secs,
                reply,
            } => {
                self.set_url(uri, offset_secs);
                let _ = reply.send(());
            }
            Command::Play(reply) => {
                self.set_play_when_ready(true);
                let _ = reply.send(());
            }
            Command::Pause(reply) => {
                self.set_play_when_ready(false);
                let _ = reply.send(());
            }
            Command::Stop(reply) => {
                self.stop();
                let _ = reply.send(());
            }
            Command::SeekToTime { time, reply } => {
                self.seek_to_time(time);
                let _ = reply.send(());
            }
            Command::CurrentTime(reply) => {
                let _ = reply.send(self.current_time());
            }
            Command::Duration(reply) => {
                let _ = reply.send(self.duration());
            }
            Command::Status(reply) => {
                let _ = reply.send(self.status);
            }
            Command::Shutdown(reply) => {
                // Handled in `run`.
                let _ = reply.send(());
            }
        }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    #[instrument(skip(self, uri), fields(uri = %redact_uri(&uri)))]
    fn set_url(&mut self, uri: String, offset_secs: f64) {
        if self.teardown_session() {
            self.set_status(PlaybackStatus::Stopped);
        }

        let mut engine = match self
            .engine_factory
            .create(&self.track_selection, &self.buffering)
        {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "Failed to create media engine");
                self.set_status(PlaybackStatus::Error);
                return;
            }
        };

        let id = PlaybackSessionId::new();
        let source = build_media_source(&uri, offset_secs, &self.user_agent);

        engine.add_listener(self.callbacks_for(id));
        engine.prepare(source);

        info!(session = %id, offset_secs, "Preparing stream");
        self.session = Some(Session {
            id,
            engine,
            uri,
            offset_secs,
        });
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        match self.session.as_mut() {
            Some(session) => {
                debug!(session = %session.id, play_when_ready, "Setting play-when-ready");
                session.engine.set_play_when_ready(play_when_ready);
            }
            None => debug!(play_when_ready, "No active session; ignoring"),
        }
    }

    fn stop(&mut self) {
        if self.teardown_session() {
            self.set_status(PlaybackStatus::Stopped);
        } else {
            debug!("Stop without an active session");
        }
    }

    fn seek_to_time(&mut self, time: f64) {
        let Some(session) = self.session.as_mut() else {
            debug!(time, "No active session; ignoring seek");
            return;
        };

        let position_ms = (time as i64).saturating_mul(MILLIS_PER_SECOND);
        debug!(session = %session.id, position_ms, "Seeking");
        session.engine.seek_to(position_ms);
    }

    fn current_time(&self) -> i64 {
        self.session
            .as_ref()
            .map(|session| (session.engine.current_position_ms() / MILLIS_PER_SECOND).max(0))
            .unwrap_or(0)
    }

    fn duration(&self) -> i64 {
        self.session
            .as_ref()
            .and_then(|session| session.engine.duration_ms())
            .map(|ms| (ms / MILLIS_PER_SECOND).max(0))
            .unwrap_or(0)
    }

    // ------------------------------------------------------------------------
    // Engine callbacks
    // ------------------------------------------------------------------------

    fn callbacks_for(&self, session: PlaybackSessionId) -> EngineCallbacks {
        let mailbox = self.mailbox.clone();
        let forward = Arc::new(move |signal: EngineSignal| {
            if let Some(mailbox) = mailbox.upgrade() {
                let _ = mailbox.send(Message::Engine { session, signal });
            }
        });

        let on_state = Arc::clone(&forward);
        let on_loading = Arc::clone(&forward);
        let on_player_error = Arc::clone(&forward);
        let on_load_error = forward;

        EngineCallbacks {
            on_state_changed: Arc::new(move |play_when_ready, state| {
                on_state(EngineSignal::StateChanged {
                    play_when_ready,
                    state,
                })
            }),
            on_loading_changed: Arc::new(move |is_loading| {
                on_loading(EngineSignal::LoadingChanged { is_loading })
            }),
            on_player_error: Arc::new(move |message| {
                on_player_error(EngineSignal::PlayerError(message))
            }),
            on_load_error: Arc::new(move |message| on_load_error(EngineSignal::LoadError(message))),
        }
    }

    fn on_engine_signal(&mut self, from: PlaybackSessionId, signal: EngineSignal) {
        let play_when_ready = match &self.session {
            Some(session) if session.id == from => Some(session.engine.play_when_ready()),
            Some(_) => {
                trace!(session = %from, signal = signal.name(), "Dropping callback from superseded session");
                return;
            }
            None => None,
        };

        match &signal {
            EngineSignal::PlayerError(message) | EngineSignal::LoadError(message) => {
                warn!(session = %from, signal = signal.name(), %message, "Media engine reported an error");
            }
            _ => trace!(session = %from, ?signal, "Engine callback"),
        }

        let transition = reduce(&signal, play_when_ready);

        if play_when_ready.is_none() && !admits_without_session(self.status, transition.status) {
            debug!(
                current = %self.status,
                rejected = %transition.status,
                "Ignoring callback without an active session"
            );
            return;
        }

        if transition.request_focus {
            self.request_audio_focus();
        }
        self.set_status(transition.status);
    }

    // ------------------------------------------------------------------------
    // Audio focus
    // ------------------------------------------------------------------------

    fn request_audio_focus(&self) {
        let mailbox = self.mailbox.clone();
        let listener: AudioFocusListener = Arc::new(move |change| {
            if let Some(mailbox) = mailbox.upgrade() {
                let _ = mailbox.send(Message::Focus(change));
            }
        });

        match self.audio_focus.request_focus(listener) {
            AudioFocusRequestResult::Granted => debug!("Audio focus granted"),
            AudioFocusRequestResult::Denied => {
                warn!("Audio focus denied; playback continues")
            }
        }
    }

    fn on_focus_change(&mut self, change: AudioFocusChange) {
        if !change.is_permanent_loss() {
            debug!(?change, "Ignoring audio focus change");
            return;
        }

        let had_session = self.teardown_session();
        if had_session || self.status != PlaybackStatus::AudioFocusLost {
            info!(had_session, "Audio focus lost; playback stopped");
            self.set_status(PlaybackStatus::AudioFocusLost);
        }
    }

    // ------------------------------------------------------------------------
    // Session and status
    // ------------------------------------------------------------------------

    /// Stop and release the active session. Returns `false` if there was none.
    fn teardown_session(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };

        debug!(
            session = %session.id,
            uri = %redact_uri(&session.uri),
            offset_secs = session.offset_secs,
            "Releasing media engine"
        );
        session.engine.stop();
        session.engine.release();
        true
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        self.status = status;
        debug!(%status, "Playback status changed");

        let event = CoreEvent::Playback(PlaybackEvent::StatusChanged { status });
        if self.event_bus.emit(event).is_err() {
            trace!(%status, "No status subscribers");
        }
    }

    fn close(&mut self) {
        if self.teardown_session() {
            self.set_status(PlaybackStatus::Stopped);
        }
        self.audio_focus.abandon_focus();
        info!("Playback controller stopped");
    }
}
