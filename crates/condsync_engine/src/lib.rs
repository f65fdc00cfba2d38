//! # Condsync Engine
//!
//! Conditional sync decorator for optimistic concurrency control.
//!
//! This crate provides:
//! - `SyncBackend`, the capability trait for persistence operations
//! - `ConditionalSync`, a decorator implementing the same capability
//! - `SyncModel` collaborator trait and `MemoryModel` implementation
//! - `SyncConfig` for version kind, default options and stale handlers
//! - `SyncEvent` notifications for version updates and stale writes
//!
//! ## Architecture
//!
//! The decorator wraps an existing sync operation and conditions mutating
//! requests on a version token previously observed from the server:
//! 1. Successful responses carrying a version header update the model
//! 2. Updates and patches echo the stored token as a precondition header
//! 3. A 412 response raises a stale-write event before the caller's own
//!    error handling runs
//!
//! ## Key Invariants
//!
//! - A precondition header is attached iff the verb is conditional and
//!   the model holds a token; reads never gain one
//! - The server's precondition check is the sole arbiter of racing writes
//! - Stale writes annotate the error path, they never replace it

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod decorator;
mod error;
mod events;
mod model;

pub use backend::{CapturedCall, CompletionHandler, MockBackend, SyncBackend, SyncOptions};
pub use config::{OptionsFragment, SyncConfig};
pub use decorator::ConditionalSync;
pub use error::{SyncError, SyncResult};
pub use events::{EventHandler, StaleWriteHandler, SyncEvent};
pub use model::{MemoryModel, SyncModel};
