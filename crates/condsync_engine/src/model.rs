//! The model collaborator: per-model sync state and event bus.

use crate::events::{EventHandler, SyncEvent};
use condsync_protocol::{HeaderMap, VersionToken};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-model state the sync layer reads and writes.
///
/// Rather than assuming a particular base-model superclass, the decorator
/// talks to this small interface: version and server-state storage, an
/// ambient per-model header set, a set-once stale-handler flag, and event
/// subscribe/emit.
pub trait SyncModel: Send + Sync {
    /// Returns the current known version token, if any.
    fn version(&self) -> Option<VersionToken>;

    /// Stores a new version token. Never cleared by the sync layer.
    fn set_version(&self, token: VersionToken);

    /// Returns the last known full server representation, if any.
    fn server_state(&self) -> Option<Value>;

    /// Overwrites the last known server representation.
    fn set_server_state(&self, state: Value);

    /// Ambient per-model default headers, merged under call-time headers.
    fn ambient_headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    /// Returns true if a stale-write handler has been attached.
    fn stale_handler_attached(&self) -> bool;

    /// Marks the stale-write handler attached. Set-once: returns true
    /// only for the call that performed the transition.
    fn mark_stale_handler_attached(&self) -> bool;

    /// Subscribes a handler to this model's sync events.
    fn subscribe(&self, handler: EventHandler);

    /// Delivers an event to every subscribed handler, in subscription
    /// order.
    fn emit(&self, event: &SyncEvent);
}

/// An in-memory model state.
///
/// Suitable both as the real collaborator for callers without their own
/// model framework and as a test double.
#[derive(Default)]
pub struct MemoryModel {
    version: RwLock<Option<VersionToken>>,
    server_state: RwLock<Option<Value>>,
    ambient_headers: RwLock<HeaderMap>,
    handler_attached: AtomicBool,
    subscribers: RwLock<Vec<EventHandler>>,
}

impl MemoryModel {
    /// Creates a model with no version, state or ambient headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with the given ambient header set.
    pub fn with_ambient_headers(headers: HeaderMap) -> Self {
        Self {
            ambient_headers: RwLock::new(headers),
            ..Self::default()
        }
    }

    /// Sets one ambient header.
    pub fn set_ambient_header(&self, name: impl AsRef<str>, value: impl Into<String>) {
        self.ambient_headers.write().insert(name, value);
    }
}

impl SyncModel for MemoryModel {
    fn version(&self) -> Option<VersionToken> {
        self.version.read().clone()
    }

    fn set_version(&self, token: VersionToken) {
        *self.version.write() = Some(token);
    }

    fn server_state(&self) -> Option<Value> {
        self.server_state.read().clone()
    }

    fn set_server_state(&self, state: Value) {
        *self.server_state.write() = Some(state);
    }

    fn ambient_headers(&self) -> HeaderMap {
        self.ambient_headers.read().clone()
    }

    fn stale_handler_attached(&self) -> bool {
        self.handler_attached.load(Ordering::SeqCst)
    }

    fn mark_stale_handler_attached(&self) -> bool {
        !self.handler_attached.swap(true, Ordering::SeqCst)
    }

    fn subscribe(&self, handler: EventHandler) {
        self.subscribers.write().push(handler);
    }

    fn emit(&self, event: &SyncEvent) {
        // Snapshot outside the lock so handlers may subscribe re-entrantly.
        let handlers: Vec<EventHandler> = self.subscribers.read().clone();
        for handler in handlers {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn version_starts_absent() {
        let model = MemoryModel::new();
        assert!(model.version().is_none());
        assert!(model.server_state().is_none());

        model.set_version(VersionToken::new("v1"));
        assert_eq!(model.version(), Some(VersionToken::new("v1")));
    }

    #[test]
    fn server_state_is_overwritten() {
        let model = MemoryModel::new();
        model.set_server_state(json!({"a": 1}));
        model.set_server_state(json!({"a": 2}));
        assert_eq!(model.server_state(), Some(json!({"a": 2})));
    }

    #[test]
    fn handler_flag_is_set_once() {
        let model = MemoryModel::new();
        assert!(!model.stale_handler_attached());
        assert!(model.mark_stale_handler_attached());
        assert!(!model.mark_stale_handler_attached());
        assert!(model.stale_handler_attached());
    }

    #[test]
    fn emit_reaches_all_subscribers() {
        let model = MemoryModel::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = Arc::clone(&count);
            model.subscribe(Arc::new(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }

        model.emit(&SyncEvent::VersionUpdated {
            token: VersionToken::new("v1"),
        });
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn ambient_headers_round_trip() {
        let model = MemoryModel::new();
        model.set_ambient_header("Authorization", "Bearer t");
        assert_eq!(
            model.ambient_headers().get("authorization"),
            Some("Bearer t")
        );
    }
}
