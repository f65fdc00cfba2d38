//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during decoration or sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No base sync operation was resolvable at decoration time.
    #[error("conditional sync requires an existing sync backend to wrap")]
    MissingBaseSync,

    /// The configured version kind is not one of the allowed values.
    #[error("invalid version kind {given:?} (expected \"etag\" or \"last-modified\")")]
    InvalidVersionKind {
        /// The rejected configuration value.
        given: String,
    },

    /// Transport failure reported by the base backend.
    ///
    /// Passed through uninterpreted; the decorator adds no meaning to
    /// transport-level failures.
    #[error("transport error: {0}")]
    Transport(String),
}
