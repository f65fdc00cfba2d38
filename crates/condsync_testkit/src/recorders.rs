//! Recorders for model events and stale-write callbacks.

use condsync_engine::{EventHandler, SyncEvent};
use condsync_protocol::VersionToken;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Records every event emitted on a model.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<SyncEvent>>,
}

impl EventLog {
    /// Creates an empty log, shareable with a subscription.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns a handler that appends to this log.
    pub fn handler(self: &Arc<Self>) -> EventHandler {
        let log = Arc::clone(self);
        Arc::new(move |event| log.events.lock().push(event.clone()))
    }

    /// Returns every recorded event, in emission order.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().clone()
    }

    /// Returns the tokens of recorded version-updated events.
    pub fn version_updates(&self) -> Vec<VersionToken> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SyncEvent::VersionUpdated { token } => Some(token.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the payloads of recorded stale-write events.
    pub fn stale_writes(&self) -> Vec<(Option<VersionToken>, Value)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SyncEvent::StaleWrite { token, server_body } => {
                    Some((token.clone(), server_body.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

/// Records invocations of a configured stale-write handler.
#[derive(Debug, Default)]
pub struct StaleWriteLog {
    calls: Mutex<Vec<(Option<VersionToken>, Value)>>,
}

impl StaleWriteLog {
    /// Creates an empty log, shareable with a configuration.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns a closure suitable for `SyncConfig::on_stale_write`.
    pub fn recorder(
        self: &Arc<Self>,
    ) -> impl Fn(Option<&VersionToken>, &Value) + Send + Sync + 'static {
        let log = Arc::clone(self);
        move |token, body| {
            log.calls.lock().push((token.cloned(), body.clone()));
        }
    }

    /// Returns every recorded invocation, in order.
    pub fn calls(&self) -> Vec<(Option<VersionToken>, Value)> {
        self.calls.lock().clone()
    }

    /// Returns the number of recorded invocations.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns true if the handler was never invoked.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}
