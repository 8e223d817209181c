//! Strongly-typed identifiers for domain entities
//!
//! Claims are keyed by a store-assigned serial number, while users are
//! referenced by the opaque identifier handed out by the identity provider.
//! Newtype wrappers keep the two from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_serial_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned serial value
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying serial value
            pub fn value(&self) -> i64 {
                self.0
            }

            /// Returns true for values a store can hand out (strictly positive)
            pub fn is_assigned(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_serial_id!(ClaimId, "CLM");

/// Identifier of an application user (lecturer, coordinator or manager)
///
/// The value is owned by the identity provider and treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display() {
        let id = ClaimId::new(42);
        assert_eq!(id.to_string(), "CLM-42");
    }

    #[test]
    fn test_id_parsing() {
        let original = ClaimId::new(7);
        let parsed: ClaimId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: ClaimId = "7".parse().unwrap();
        assert_eq!(bare, original);
    }

    #[test]
    fn test_unassigned_ids() {
        assert!(!ClaimId::new(0).is_assigned());
        assert!(!ClaimId::new(-3).is_assigned());
        assert!(ClaimId::new(1).is_assigned());
    }

    #[test]
    fn test_user_id_is_opaque() {
        let id = UserId::from("user123");
        assert_eq!(id.as_str(), "user123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user123\"");
    }
}
