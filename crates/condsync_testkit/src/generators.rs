//! Property-based test generators.

use condsync_protocol::{Verb, VersionKind};
use proptest::prelude::*;

/// Strategy producing any persistence verb.
pub fn any_verb() -> impl Strategy<Value = Verb> {
    prop::sample::select(Verb::ALL.to_vec())
}

/// Strategy producing a conditional (precondition-carrying) verb.
pub fn conditional_verb() -> impl Strategy<Value = Verb> {
    prop::sample::select(vec![Verb::Update, Verb::Patch])
}

/// Strategy producing a verb that never carries a precondition.
pub fn unconditional_verb() -> impl Strategy<Value = Verb> {
    prop::sample::select(vec![Verb::Create, Verb::Read, Verb::Delete])
}

/// Strategy producing either version kind.
pub fn any_kind() -> impl Strategy<Value = VersionKind> {
    prop::sample::select(vec![VersionKind::Etag, VersionKind::LastModified])
}

/// Strategy producing a header-safe version token value.
pub fn token_value() -> impl Strategy<Value = String> {
    "[!-~]{1,40}"
}
