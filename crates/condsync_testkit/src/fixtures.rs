//! Canned responses and model fixtures.

use condsync_engine::{MemoryModel, SyncModel};
use condsync_protocol::{Response, VersionKind, PRECONDITION_FAILED};
use serde_json::{json, Value};
use std::sync::Arc;

/// A fresh in-memory model behind the collaborator trait.
pub fn memory_model() -> Arc<dyn SyncModel> {
    Arc::new(MemoryModel::new())
}

/// A 200 response with no version header and a small JSON body.
pub fn plain_ok() -> Response {
    Response::new(200).with_json_body(&json!({"foo": "baz"}))
}

/// A 200 response carrying the given version token and JSON body.
pub fn versioned_ok(kind: VersionKind, token: &str, body: &Value) -> Response {
    Response::new(200)
        .with_header(kind.response_header(), token)
        .with_json_body(body)
}

/// A 412 rejection carrying the server's current version and state.
pub fn precondition_failed(kind: VersionKind, token: &str, body: &Value) -> Response {
    Response::new(PRECONDITION_FAILED)
        .with_header(kind.response_header(), token)
        .with_json_body(body)
}

/// A bare 412 rejection: no version header, no body.
pub fn precondition_failed_bare() -> Response {
    Response::new(PRECONDITION_FAILED)
}
