//! Integration tests for the host façade

use bridge_traits::{
    AudioFocusListener, AudioFocusManager, AudioFocusRequestResult,
    BridgeError, BufferingPolicy, EngineCallbacks, EngineState, MediaEngine, MediaEngineFactory,
    MediaSource, TrackSelectionPolicy,
};
use core_runtime::config::StreamerConfig;
use core_service::{AudioStreamer, HostEvent, MODULE_NAME};
use mockall::mock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Default)]
struct EngineProbe {
    callbacks: Option<EngineCallbacks>,
    play_when_ready: bool,
    position_ms: i64,
    duration_ms: Option<i64>,
}

#[derive(Clone, Default)]
struct SharedEngine(Arc<Mutex<EngineProbe>>);

impl SharedEngine {
    fn fire_state(&self, state: EngineState) {
        let (callbacks, play_when_ready) = {
            let inner = self.0.lock();
            (inner.callbacks.clone().expect("listener"), inner.play_when_ready)
        };
        (callbacks.on_state_changed)(play_when_ready, state);
    }
}

impl MediaEngine for SharedEngine {
    fn add_listener(&mut self, callbacks: EngineCallbacks) {
        self.0.lock().callbacks = Some(callbacks);
    }
    fn prepare(&mut self, _source: MediaSource) {}
    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.0.lock().play_when_ready = play_when_ready;
    }
    fn play_when_ready(&self) -> bool {
        self.0.lock().play_when_ready
    }
    fn seek_to(&mut self, position_ms: i64) {
        self.0.lock().position_ms = position_ms;
    }
    fn current_position_ms(&self) -> i64 {
        self.0.lock().position_ms
    }
    fn duration_ms(&self) -> Option<i64> {
        self.0.lock().duration_ms
    }
    fn stop(&mut self) {}
}

#[derive(Default)]
struct SingleEngineFactory {
    engine: SharedEngine,
}

impl MediaEngineFactory for SingleEngineFactory {
    fn create(
        &self,
        _track_selection: &TrackSelectionPolicy,
        _buffering: &BufferingPolicy,
    ) -> Result<Box<dyn MediaEngine>, BridgeError> {
        Ok(Box::new(self.engine.clone()))
    }
}

struct GrantingFocus;

impl AudioFocusManager for GrantingFocus {
    fn request_focus(&self, _listener: AudioFocusListener) -> AudioFocusRequestResult {
        AudioFocusRequestResult::Granted
    }
}

mock! {
    pub Factory {}

    impl MediaEngineFactory for Factory {
        fn create(
            &self,
            track_selection: &TrackSelectionPolicy,
            buffering: &BufferingPolicy,
        ) -> Result<Box<dyn MediaEngine>, BridgeError>;
    }
}

fn streamer_with(factory: Arc<dyn MediaEngineFactory>) -> AudioStreamer {
    let config = StreamerConfig::builder()
        .engine_factory(factory)
        .audio_focus(Arc::new(GrantingFocus))
        .build()
        .unwrap();
    AudioStreamer::new(config).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_module_and_event_names() {
    let streamer = streamer_with(Arc::new(SingleEngineFactory::default()));
    assert_eq!(streamer.module_name(), "AudioStreamer");
    assert_eq!(MODULE_NAME, "AudioStreamer");
    assert_eq!(streamer.status_event_name(), "AudioStreamerStatusChanged");
}

#[tokio::test]
async fn test_status_events_reach_host() {
    let factory = Arc::new(SingleEngineFactory::default());
    let engine = factory.engine.clone();
    let streamer = streamer_with(factory);
    let mut events = streamer.events();

    assert_eq!(streamer.status().await, "STOPPED");

    streamer.set_url("http://x/a.mp3").await;
    engine.fire_state(EngineState::Buffering);
    engine.fire_state(EngineState::Ready);
    assert_eq!(streamer.status().await, "PAUSED");

    streamer.play().await;
    engine.fire_state(EngineState::Ready);
    assert_eq!(streamer.status().await, "PLAYING");

    let mut received = Vec::new();
    for _ in 0..3 {
        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("event delivered")
            .expect("stream open");
        received.push(event);
    }

    let bodies: Vec<&str> = received.iter().map(|e| e.body.as_str()).collect();
    assert_eq!(bodies, vec!["BUFFERING", "PAUSED", "PLAYING"]);
    assert!(received
        .iter()
        .all(|e| e.name == "AudioStreamerStatusChanged"));
}

#[tokio::test]
async fn test_queries_report_f64_seconds() {
    let factory = Arc::new(SingleEngineFactory::default());
    let engine = factory.engine.clone();
    let streamer = streamer_with(factory);

    assert_eq!(streamer.current_time().await, 0.0);
    assert_eq!(streamer.duration().await, 0.0);

    streamer.set_url("http://x/a.mp3").await;
    engine.0.lock().duration_ms = Some(241_700);
    streamer.seek_to_time(42.0).await;

    assert_eq!(streamer.current_time().await, 42.0);
    assert_eq!(streamer.duration().await, 241.0);
}

#[tokio::test]
async fn test_custom_event_name() {
    let factory = Arc::new(SingleEngineFactory::default());
    let config = StreamerConfig::builder()
        .engine_factory(factory)
        .audio_focus(Arc::new(GrantingFocus))
        .status_event_name("StreamerStatus")
        .build()
        .unwrap();
    let streamer = AudioStreamer::new(config).unwrap();
    let mut events = streamer.events();

    streamer.set_url("http://x/a.mp3").await;
    streamer.stop().await;

    assert_eq!(
        events.try_recv(),
        Some(HostEvent {
            name: "StreamerStatus".into(),
            body: "STOPPED".into(),
        })
    );
    assert_eq!(events.try_recv(), None);
}

#[tokio::test]
async fn test_engine_creation_failure_surfaces_as_error_status() {
    let mut factory = MockFactory::new();
    factory
        .expect_create()
        .times(1)
        .returning(|_, _| Err(BridgeError::Engine("unsupported codec".into())));

    let streamer = streamer_with(Arc::new(factory));
    let mut events = streamer.events();

    streamer.set_url("http://x/a.mp3").await;
    assert_eq!(streamer.status().await, "ERROR");
    assert_eq!(events.try_recv().map(|e| e.body), Some("ERROR".to_string()));
}

#[tokio::test]
async fn test_commands_after_shutdown_are_swallowed() {
    let streamer = streamer_with(Arc::new(SingleEngineFactory::default()));
    streamer.shutdown().await;
    streamer.shutdown().await;

    streamer.set_url("http://x/a.mp3").await;
    streamer.play().await;
    assert_eq!(streamer.status().await, "STOPPED");
    assert_eq!(streamer.current_time().await, 0.0);
    assert!(streamer.controller().is_closed());
}

#[cfg(feature = "desktop-shims")]
#[tokio::test]
async fn test_desktop_bootstrap_handles_focus_loss() {
    let factory = Arc::new(SingleEngineFactory::default());
    let engine = factory.engine.clone();
    let (streamer, focus) = core_service::bootstrap_desktop(factory).unwrap();

    streamer.set_url("http://x/a.mp3").await;
    streamer.play().await;
    engine.fire_state(EngineState::Ready);
    assert_eq!(streamer.status().await, "PLAYING");

    assert!(focus.notify(bridge_traits::AudioFocusChange::Loss));
    assert_eq!(streamer.status().await, "AUDIOFOCUS_LOST");
    assert_eq!(streamer.current_time().await, 0.0);
}
