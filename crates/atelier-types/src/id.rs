//! Identifier types for atelier entities.
//!
//! All identifiers are UUID-based. Records created at runtime get a random
//! UUID v4; records that ship with the static seed portfolio use
//! [`from_seed`](ProjectId::from_seed), a UUID v5 derived from a stable name,
//! so the same seed produces the same ids on every start.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::{uuid, Uuid};

/// Namespace UUID for deterministic UUID v5 generation of seed ids.
const ATELIER_NAMESPACE: Uuid = uuid!("6f0c4a8e-3b1d-4f57-9c2a-7d5e1b8f4a30");

/// Error returned when an identifier string is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id '{input}'")]
pub struct ParseIdError {
    /// Which id type was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new id with a random UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a deterministic id (UUID v5) from a seed name.
            ///
            /// The id type's prefix is mixed in, so a project and a stage
            /// seeded with the same name still get different ids.
            #[must_use]
            pub fn from_seed(name: &str) -> Self {
                let key = format!("{}:{}", $prefix, name);
                Self(Uuid::new_v5(&ATELIER_NAMESPACE, key.as_bytes()))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let trimmed = trimmed
                    .strip_prefix(concat!($prefix, ":"))
                    .unwrap_or(trimmed);
                Uuid::parse_str(trimmed).map(Self).map_err(|_| ParseIdError {
                    kind: $prefix,
                    input: s.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Identifier for a [`Project`](crate::Project).
    ProjectId,
    "project"
);

define_id!(
    /// Identifier for a [`Stage`](crate::Stage) within a project.
    StageId,
    "stage"
);

define_id!(
    /// Identifier for a [`Task`](crate::Task) within a stage.
    TaskId,
    "task"
);

define_id!(
    /// Identifier for a studio [`TeamMember`](crate::TeamMember).
    MemberId,
    "member"
);

define_id!(
    /// Identifier for an uploaded [`Document`](crate::Document).
    DocumentId,
    "document"
);

define_id!(
    /// Identifier for a client [`Invoice`](crate::Invoice).
    InvoiceId,
    "invoice"
);
