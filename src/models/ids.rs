//! Strongly-typed ID wrappers for claims and users
//!
//! IDs are assigned by the record store and treated as opaque strings.
//! Newtype wrappers keep claim and user identifiers from being mixed up at
//! compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID (used when the local store assigns one)
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Deterministic ID for a record stored without one
            ///
            /// The same seed always yields the same ID, so a record keeps its
            /// identity across reloads.
            pub fn derived(seed: &str) -> Self {
                Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string())
            }

            /// Wrap an identifier issued elsewhere
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(ClaimId);
define_id!(UserId);
