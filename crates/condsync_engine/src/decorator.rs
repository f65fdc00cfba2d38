//! The conditional sync decorator.

use crate::backend::{SyncBackend, SyncOptions};
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::events::SyncEvent;
use crate::model::SyncModel;
use condsync_protocol::{Response, Verb, VersionKind, VersionToken};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Decorates a base sync operation with optimistic concurrency control.
///
/// The decorator implements the same [`SyncBackend`] capability it wraps,
/// with identical behavior for reads plus added behavior for mutating
/// verbs:
///
/// - every successful response carrying the configured version header
///   updates the model's token (and, for JSON object bodies, its last
///   known server state), then raises [`SyncEvent::VersionUpdated`];
/// - updates and patches against a versioned model go out with the mapped
///   precondition header attached;
/// - a 412 rejection raises [`SyncEvent::StaleWrite`] with the server's
///   current version and state before the caller's own error continuation
///   runs.
///
/// Concurrent mutating calls against the same model are not serialized;
/// the server's precondition check arbitrates races.
pub struct ConditionalSync<B> {
    base: B,
    config: SyncConfig,
}

impl<B: SyncBackend> ConditionalSync<B> {
    /// Wraps a base backend with the given configuration.
    pub fn new(base: B, config: SyncConfig) -> Self {
        Self { base, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Unwraps the decorator, returning the base backend.
    pub fn into_inner(self) -> B {
        self.base
    }
}

impl ConditionalSync<Arc<dyn SyncBackend>> {
    /// Wraps a backend resolved at runtime.
    ///
    /// Fails immediately with [`SyncError::MissingBaseSync`] when no base
    /// operation was resolvable; the error is never deferred to the first
    /// call.
    pub fn try_wrap(base: Option<Arc<dyn SyncBackend>>, config: SyncConfig) -> SyncResult<Self> {
        match base {
            Some(base) => Ok(Self::new(base, config)),
            None => Err(SyncError::MissingBaseSync),
        }
    }
}

impl<B: SyncBackend> SyncBackend for ConditionalSync<B> {
    fn sync(
        &self,
        verb: Verb,
        model: &Arc<dyn SyncModel>,
        mut options: SyncOptions,
    ) -> SyncResult<()> {
        let kind = self.config.kind();

        // Resolve options: configured defaults (wildcard, then verb), then
        // the model's ambient headers, then whatever the caller set on
        // this call. Shallow merge, later wins.
        let defaults = self.config.defaults_for(verb);

        let mut headers = defaults.headers;
        headers.overlay(&model.ambient_headers());
        headers.overlay(&options.headers);
        options.headers = headers;

        let mut params = defaults.params;
        for (key, value) in std::mem::take(&mut options.params) {
            params.insert(key, value);
        }
        options.params = params;

        if verb.is_conditional() {
            if let Some(token) = model.version() {
                debug!(
                    %verb,
                    header = kind.precondition_header(),
                    "attaching precondition header"
                );
                options
                    .headers
                    .insert(kind.precondition_header(), token.as_str());
            }

            if let Some(handler) = self.config.invalid_handler() {
                if model.mark_stale_handler_attached() {
                    let handler = Arc::clone(handler);
                    model.subscribe(Arc::new(move |event| {
                        if let SyncEvent::StaleWrite { token, server_body } = event {
                            handler(token.as_ref(), server_body);
                        }
                    }));
                }
            }

            // Recognize stale writes before the caller's own error
            // handling; the original continuation still fires afterward.
            let model = Arc::clone(model);
            let mut inner = options.on_error.take();
            options.on_error = Some(Box::new(move |response: &Response| {
                if response.is_precondition_failed() {
                    raise_stale_write(&model, kind, response);
                }
                if let Some(on_error) = inner.as_mut() {
                    on_error(response);
                }
            }));
        }

        // Every verb feeds version state from successful responses.
        let model_for_success = Arc::clone(model);
        let mut inner = options.on_success.take();
        options.on_success = Some(Box::new(move |response: &Response| {
            capture_version(&model_for_success, kind, response);
            if let Some(on_success) = inner.as_mut() {
                on_success(response);
            }
        }));

        self.base.sync(verb, model, options)
    }
}

/// Stores the response's version header on the model, overwrites the
/// model's server state for JSON object bodies, and raises the
/// version-updated event. A response without the header is not an error;
/// it simply skips the update.
fn capture_version(model: &Arc<dyn SyncModel>, kind: VersionKind, response: &Response) {
    let Some(value) = response.header(kind.response_header()) else {
        return;
    };
    let token = VersionToken::new(value);
    model.set_version(token.clone());

    if response.is_json() {
        if let Ok(state @ Value::Object(_)) = serde_json::from_slice::<Value>(response.body()) {
            model.set_server_state(state);
        }
    }

    debug!(%token, "captured server version");
    model.emit(&SyncEvent::VersionUpdated { token });
}

/// Extracts the server's current version and state from a 412 response
/// and raises the stale-write event. Body parsing is lenient and the
/// header may be absent; extraction never fails.
fn raise_stale_write(model: &Arc<dyn SyncModel>, kind: VersionKind, response: &Response) {
    let token = response.header(kind.response_header()).map(VersionToken::new);
    let server_body = if response.is_json() {
        response.body_json_lenient()
    } else {
        Value::Object(Map::new())
    };

    debug!(status = response.status(), "stale write rejected by server");
    model.emit(&SyncEvent::StaleWrite { token, server_body });
}
