//! Named status events in the shape host event emitters expect.

use core_runtime::events::{CoreEvent, EventStream};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::error::Result;

/// A named event with a string body, ready for a host event emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEvent {
    pub name: String,
    pub body: String,
}

impl HostEvent {
    fn from_core(name: &str, event: &CoreEvent) -> Option<Self> {
        event.status().map(|status| Self {
            name: name.to_string(),
            body: status.as_str().to_string(),
        })
    }

    /// `{"name":"...","body":"..."}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Stream of [`HostEvent`]s for one subscriber.
pub struct HostEventStream {
    inner: EventStream,
    name: String,
}

impl HostEventStream {
    pub(crate) fn new(inner: EventStream, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    /// Next status event, or `None` once the streamer is gone.
    ///
    /// A subscriber that falls behind skips the missed events and continues
    /// with the oldest one still buffered.
    pub async fn recv(&mut self) -> Option<HostEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => {
                    if let Some(host_event) = HostEvent::from_core(&self.name, &event) {
                        return Some(host_event);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Host event subscriber lagged; events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered status event without waiting.
    pub fn try_recv(&mut self) -> Option<HostEvent> {
        loop {
            match self.inner.try_recv()? {
                Ok(event) => {
                    if let Some(host_event) = HostEvent::from_core(&self.name, &event) {
                        return Some(host_event);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Host event subscriber lagged; events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl std::fmt::Debug for HostEventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostEventStream")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
