//! Application users and their review roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, UserId};
use crate::claim::ClaimStatus;

/// Role a user acts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Lecturer,
    Coordinator,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Lecturer => "Lecturer",
            Role::Coordinator => "Coordinator",
            Role::Manager => "Manager",
        }
    }

    /// The status of claims waiting on this role, if it reviews at all
    pub fn review_stage(&self) -> Option<ClaimStatus> {
        match self {
            Role::Lecturer => None,
            Role::Coordinator => Some(ClaimStatus::PendingReview),
            Role::Manager => Some(ClaimStatus::VerifiedByCoordinator),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecturer" => Ok(Role::Lecturer),
            "coordinator" => Ok(Role::Coordinator),
            "manager" => Ok(Role::Manager),
            _ => Err(CoreError::unknown_value("role", s)),
        }
    }
}

/// A user known to the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl ApplicationUser {
    /// "First Last", trimmed; empty parts are skipped
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
