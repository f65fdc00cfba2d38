//! # Condsync Testkit
//!
//! Test utilities for condsync.
//!
//! This crate provides:
//! - Canned response fixtures (versioned success, 412 rejection)
//! - A scripted backend playing back a sequence of completions
//! - Event and stale-write recorders
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use condsync_engine::{ConditionalSync, SyncBackend, SyncConfig, SyncModel, SyncOptions};
//! use condsync_protocol::{Verb, VersionKind};
//! use condsync_testkit::prelude::*;
//! use serde_json::json;
//!
//! let backend = scripted([ok(versioned_ok(
//!     VersionKind::Etag,
//!     "\"v1\"",
//!     &json!({"id": 1}),
//! ))]);
//! let decorator = ConditionalSync::new(backend.clone(), SyncConfig::new());
//! let model = memory_model();
//!
//! decorator.sync(Verb::Read, &model, SyncOptions::new()).unwrap();
//! assert_eq!(model.version().unwrap().as_str(), "\"v1\"");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod recorders;
pub mod scripted;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::recorders::*;
    pub use crate::scripted::*;
}

pub use fixtures::*;
pub use generators::*;
pub use recorders::*;
pub use scripted::*;
