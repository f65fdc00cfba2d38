//! Version kinds and opaque version tokens.

use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which header family carries the entity version.
///
/// Exactly one kind is active per decorated model type, fixed at
/// configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionKind {
    /// Entity tag: versions sourced from `etag`, preconditions sent as
    /// `if-match`.
    #[default]
    Etag,
    /// Modification timestamp: versions sourced from `last-modified`,
    /// preconditions sent as `if-unmodified-since`.
    LastModified,
}

/// The public mapping from version-source header to precondition header.
///
/// Exposed so callers building their own request logic can introspect the
/// same table the decorator uses.
pub const HEADER_MAP: [(VersionKind, &str, &str); 2] = [
    (VersionKind::Etag, "etag", "if-match"),
    (VersionKind::LastModified, "last-modified", "if-unmodified-since"),
];

impl VersionKind {
    /// Returns the response header this kind reads versions from.
    pub const fn response_header(&self) -> &'static str {
        match self {
            VersionKind::Etag => "etag",
            VersionKind::LastModified => "last-modified",
        }
    }

    /// Returns the request header this kind sends preconditions on.
    pub const fn precondition_header(&self) -> &'static str {
        match self {
            VersionKind::Etag => "if-match",
            VersionKind::LastModified => "if-unmodified-since",
        }
    }

    /// Returns the configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        self.response_header()
    }

    /// Parses a configuration value into a kind.
    ///
    /// Anything other than `"etag"` or `"last-modified"` is rejected.
    pub fn parse(s: &str) -> ProtocolResult<Self> {
        match s {
            "etag" => Ok(VersionKind::Etag),
            "last-modified" => Ok(VersionKind::LastModified),
            other => Err(ProtocolError::UnknownVersionKind(other.to_string())),
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque marker of an entity's last-known server state.
///
/// The value is whatever the server put in the version header, an ETag or
/// a Last-Modified timestamp. The client never interprets it; it only
/// echoes it back as a precondition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Creates a token from a header value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as a header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VersionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
