//! Persistence verbs.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A persistence verb understood by a sync backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Create a new entity.
    Create,
    /// Read an entity.
    Read,
    /// Replace an entity.
    Update,
    /// Partially update an entity.
    Patch,
    /// Delete an entity.
    Delete,
}

impl Verb {
    /// All verbs, in protocol order.
    pub const ALL: [Verb; 5] = [
        Verb::Create,
        Verb::Read,
        Verb::Update,
        Verb::Patch,
        Verb::Delete,
    ];

    /// Returns true for verbs whose requests carry a version precondition.
    ///
    /// Only full and partial updates are guarded; reads, creates and
    /// deletes go out unconditioned.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Verb::Update | Verb::Patch)
    }

    /// Returns the protocol name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Read => "read",
            Verb::Update => "update",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Verb::Create),
            "read" => Ok(Verb::Read),
            "update" => Ok(Verb::Update),
            "patch" => Ok(Verb::Patch),
            "delete" => Ok(Verb::Delete),
            other => Err(ProtocolError::UnknownVerb(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_verbs() {
        assert!(Verb::Update.is_conditional());
        assert!(Verb::Patch.is_conditional());
        assert!(!Verb::Create.is_conditional());
        assert!(!Verb::Read.is_conditional());
        assert!(!Verb::Delete.is_conditional());
    }

    #[test]
    fn verb_round_trip() {
        for verb in Verb::ALL {
            assert_eq!(verb.as_str().parse::<Verb>().unwrap(), verb);
        }
    }

    #[test]
    fn unknown_verb_rejected() {
        let err = "fetch".parse::<Verb>().unwrap_err();
        assert_eq!(err, ProtocolError::UnknownVerb("fetch".into()));
    }
}
