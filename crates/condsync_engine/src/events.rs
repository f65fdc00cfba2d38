//! Notifications raised on a model by the sync layer.

use condsync_protocol::VersionToken;
use serde_json::Value;
use std::sync::Arc;

/// An event emitted on a model's subscriber list.
///
/// The model itself is implicit: handlers are registered on the model
/// instance the event concerns.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A successful response carried a fresh version token.
    VersionUpdated {
        /// The token now stored on the model.
        token: VersionToken,
    },
    /// A mutating request was rejected with 412 Precondition Failed.
    ///
    /// Carries the server's current version and state so the caller can
    /// reconcile. Repeated stale writes are all delivered; nothing is
    /// de-duplicated.
    StaleWrite {
        /// The server's current version, absent if it omitted the header.
        token: Option<VersionToken>,
        /// The server's current state, an empty object when the body was
        /// absent or not JSON.
        server_body: Value,
    },
}

/// A subscriber to model sync events.
pub type EventHandler = Arc<dyn Fn(&SyncEvent) + Send + Sync>;

/// A callback invoked on every stale-write notification with the server's
/// current version (if any) and state.
pub type StaleWriteHandler = Arc<dyn Fn(Option<&VersionToken>, &Value) + Send + Sync>;
