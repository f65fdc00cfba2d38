//! The sync capability: backend trait and per-call options.

use crate::error::SyncResult;
use crate::model::SyncModel;
use condsync_protocol::{HeaderMap, Response, Verb};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A completion callback invoked with the finished response.
pub type CompletionHandler = Box<dyn FnMut(&Response) + Send>;

/// Per-call request options.
///
/// Carries the resolved header set, free-form option fragments, and the
/// caller's success/error continuations. The decorator augments all of
/// these before delegating to the base backend.
#[derive(Default)]
pub struct SyncOptions {
    /// Request headers for this call.
    pub headers: HeaderMap,
    /// Free-form non-header options, merged shallowly with configured
    /// defaults.
    pub params: Map<String, Value>,
    /// Invoked when the underlying operation completes successfully.
    pub on_success: Option<CompletionHandler>,
    /// Invoked when the underlying operation fails.
    pub on_error: Option<CompletionHandler>,
}

impl SyncOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header explicitly for this call.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a free-form option for this call.
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Sets the success continuation.
    pub fn on_success(mut self, handler: impl FnMut(&Response) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(handler));
        self
    }

    /// Sets the error continuation.
    pub fn on_error(mut self, handler: impl FnMut(&Response) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Anything exposing a sync operation of the persistence shape.
///
/// This is the capability the decorator both requires and implements, so
/// decorations compose: a `ConditionalSync` over a `ConditionalSync` over
/// a transport is still a `SyncBackend`.
///
/// Implementations must accept the options' header map and invoke the
/// success/error continuations on completion; beyond that the completion
/// protocol (callback-style, promise-style, blocking) is theirs.
pub trait SyncBackend: Send + Sync {
    /// Persists `model` to the remote store.
    fn sync(&self, verb: Verb, model: &Arc<dyn SyncModel>, options: SyncOptions) -> SyncResult<()>;
}

impl<T: SyncBackend + ?Sized> SyncBackend for Arc<T> {
    fn sync(&self, verb: Verb, model: &Arc<dyn SyncModel>, options: SyncOptions) -> SyncResult<()> {
        (**self).sync(verb, model, options)
    }
}

/// One call observed by a [`MockBackend`].
#[derive(Debug, Clone)]
pub struct CapturedCall {
    /// The verb of the call.
    pub verb: Verb,
    /// The fully resolved headers that went out.
    pub headers: HeaderMap,
    /// The fully resolved free-form options.
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
enum Outcome {
    /// No completion is delivered; the call stays in flight.
    #[default]
    Pending,
    Success(Response),
    Error(Response),
}

/// A mock backend for testing.
///
/// Records every call's resolved options and completes each call
/// synchronously with a configured response, on the success or the error
/// path.
#[derive(Debug, Default)]
pub struct MockBackend {
    outcome: Mutex<Outcome>,
    calls: Mutex<Vec<CapturedCall>>,
}

impl MockBackend {
    /// Creates a mock that leaves calls pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes subsequent calls through the success continuation.
    pub fn set_success(&self, response: Response) {
        *self.outcome.lock() = Outcome::Success(response);
    }

    /// Completes subsequent calls through the error continuation.
    pub fn set_error(&self, response: Response) {
        *self.outcome.lock() = Outcome::Error(response);
    }

    /// Leaves subsequent calls pending (no completion delivered).
    pub fn set_pending(&self) {
        *self.outcome.lock() = Outcome::Pending;
    }

    /// Returns every call observed so far.
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().clone()
    }

    /// Returns the most recent call, if any.
    pub fn last_call(&self) -> Option<CapturedCall> {
        self.calls.lock().last().cloned()
    }
}

impl SyncBackend for MockBackend {
    fn sync(
        &self,
        verb: Verb,
        _model: &Arc<dyn SyncModel>,
        mut options: SyncOptions,
    ) -> SyncResult<()> {
        self.calls.lock().push(CapturedCall {
            verb,
            headers: options.headers.clone(),
            params: options.params.clone(),
        });

        let outcome = self.outcome.lock().clone();
        match outcome {
            Outcome::Success(response) => {
                if let Some(mut on_success) = options.on_success.take() {
                    on_success(&response);
                }
            }
            Outcome::Error(response) => {
                if let Some(mut on_error) = options.on_error.take() {
                    on_error(&response);
                }
            }
            Outcome::Pending => {}
        }
        Ok(())
    }
}
