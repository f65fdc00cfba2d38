//! Error types for protocol parsing.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while interpreting protocol values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A verb name that is not one of the five persistence verbs.
    #[error("unknown verb: {0:?}")]
    UnknownVerb(String),

    /// A version kind that is neither "etag" nor "last-modified".
    #[error("unknown version kind: {0:?} (expected \"etag\" or \"last-modified\")")]
    UnknownVersionKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProtocolError::UnknownVersionKind("weak".into());
        assert!(err.to_string().contains("weak"));
        assert!(err.to_string().contains("etag"));

        let err = ProtocolError::UnknownVerb("fetch".into());
        assert!(err.to_string().contains("fetch"));
    }
}
