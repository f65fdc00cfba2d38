//! Configuration for the conditional sync decorator.

use crate::error::{SyncError, SyncResult};
use crate::events::StaleWriteHandler;
use condsync_protocol::{HeaderMap, Verb, VersionKind, VersionToken};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A default-options fragment: headers plus free-form options.
///
/// Fragments merge shallowly, later wins per key.
#[derive(Debug, Clone, Default)]
pub struct OptionsFragment {
    /// Default headers contributed by this fragment.
    pub headers: HeaderMap,
    /// Default free-form options contributed by this fragment.
    pub params: Map<String, Value>,
}

impl OptionsFragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds a default free-form option.
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Overlays `other` onto this fragment, shallowly.
    pub fn overlay(&mut self, other: &OptionsFragment) {
        self.headers.overlay(&other.headers);
        for (key, value) in &other.params {
            self.params.insert(key.clone(), value.clone());
        }
    }
}

/// Configuration for a decorated model type.
///
/// Immutable once the decorator is constructed. Selects the version kind,
/// contributes per-verb and wildcard default options, and optionally names
/// a handler auto-subscribed to stale-write events.
#[derive(Clone, Default)]
pub struct SyncConfig {
    kind: VersionKind,
    all_defaults: OptionsFragment,
    verb_defaults: HashMap<Verb, OptionsFragment>,
    invalid_handler: Option<StaleWriteHandler>,
}

impl SyncConfig {
    /// Creates a configuration with the default kind (`etag`) and no
    /// default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the version kind.
    pub fn with_kind(mut self, kind: VersionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the version kind from a configuration string.
    ///
    /// Fails with [`SyncError::InvalidVersionKind`] for anything other
    /// than `"etag"` or `"last-modified"`.
    pub fn with_kind_str(self, kind: &str) -> SyncResult<Self> {
        match VersionKind::parse(kind) {
            Ok(kind) => Ok(self.with_kind(kind)),
            Err(_) => Err(SyncError::InvalidVersionKind {
                given: kind.to_string(),
            }),
        }
    }

    /// Sets the wildcard fragment merged into every call.
    pub fn with_defaults(mut self, fragment: OptionsFragment) -> Self {
        self.all_defaults = fragment;
        self
    }

    /// Sets the fragment merged into calls of one verb, over the wildcard.
    pub fn with_verb_defaults(mut self, verb: Verb, fragment: OptionsFragment) -> Self {
        self.verb_defaults.insert(verb, fragment);
        self
    }

    /// Sets the handler auto-subscribed to stale-write events the first
    /// time a mutating request is issued for a model.
    pub fn on_stale_write(
        mut self,
        handler: impl Fn(Option<&VersionToken>, &Value) + Send + Sync + 'static,
    ) -> Self {
        self.invalid_handler = Some(Arc::new(handler));
        self
    }

    /// Returns the configured version kind.
    pub fn kind(&self) -> VersionKind {
        self.kind
    }

    /// Returns the configured stale-write handler, if any.
    pub fn invalid_handler(&self) -> Option<&StaleWriteHandler> {
        self.invalid_handler.as_ref()
    }

    /// Resolves the defaults for one verb: the wildcard fragment with the
    /// verb's own fragment overlaid.
    pub fn defaults_for(&self, verb: Verb) -> OptionsFragment {
        let mut resolved = self.all_defaults.clone();
        if let Some(fragment) = self.verb_defaults.get(&verb) {
            resolved.overlay(fragment);
        }
        resolved
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("kind", &self.kind)
            .field("all_defaults", &self.all_defaults)
            .field("verb_defaults", &self.verb_defaults)
            .field("invalid_handler", &self.invalid_handler.is_some())
            .finish()
    }
}
