//! # Condsync Protocol
//!
//! Conditional-request protocol types for condsync.
//!
//! This crate provides:
//! - `Verb` for persistence operations
//! - `VersionKind` and the public version/precondition header mapping
//! - `VersionToken` for opaque entity versions
//! - `HeaderMap` with case-insensitive names
//! - `Response` with lenient JSON body access
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod headers;
mod response;
mod verb;
mod version;

pub use error::{ProtocolError, ProtocolResult};
pub use headers::HeaderMap;
pub use response::{Response, PRECONDITION_FAILED};
pub use verb::Verb;
pub use version::{VersionKind, VersionToken, HEADER_MAP};
