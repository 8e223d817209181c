//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CoreError, Money, MoneyError, UserId};
use crate::error::ClaimError;

/// Upper bound on hours in a single claim (a 31-day month)
pub const MAX_HOURS_WORKED: u32 = 744;

/// Decimal places kept for hours worked
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// Upper bound on the hourly rate
pub const MAX_HOURLY_RATE: u32 = 100_000;

/// Review status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, waiting for a coordinator
    PendingReview,
    /// Verified by a coordinator, waiting for a manager
    VerifiedByCoordinator,
    /// Approved by a manager (final)
    ApprovedByManager,
    /// Rejected by a coordinator or manager (final)
    Rejected,
}

impl ClaimStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::PendingReview,
        ClaimStatus::VerifiedByCoordinator,
        ClaimStatus::ApprovedByManager,
        ClaimStatus::Rejected,
    ];

    /// Returns the canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::PendingReview => "PendingReview",
            ClaimStatus::VerifiedByCoordinator => "VerifiedByCoordinator",
            ClaimStatus::ApprovedByManager => "ApprovedByManager",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Returns true once no further transition is possible
    pub fn is_final(&self) -> bool {
        matches!(self, ClaimStatus::ApprovedByManager | ClaimStatus::Rejected)
    }

    /// Checks the transition table
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (*self, target),
            (PendingReview, VerifiedByCoordinator)
                | (PendingReview, Rejected)
                | (VerifiedByCoordinator, ApprovedByManager)
                | (VerifiedByCoordinator, Rejected)
        )
    }

    /// Returns `target` if the move is allowed
    pub fn transition_to(self, target: ClaimStatus) -> Result<ClaimStatus, ClaimError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(ClaimError::InvalidStatusTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    /// Accepts `PendingReview`, `pending_review` and `pendingreview`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| CoreError::unknown_value("claim status", s))
    }
}

/// A lecturer's claim for hours worked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Store-assigned identifier
    pub id: ClaimId,
    /// Submitting lecturer
    pub lecturer_id: UserId,
    /// Lecturer's display name, resolved at submission
    pub lecturer_name: String,
    /// Hours worked
    pub hours_worked: Decimal,
    /// Hourly rate
    pub hourly_rate: Money,
    /// Free-text notes from the lecturer
    pub notes: Option<String>,
    /// Storage reference of the supporting document
    pub document_ref: String,
    /// Original file name of the supporting document
    pub document_name: String,
    /// Review status
    pub status: ClaimStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Payout owed for this claim (rate × hours)
    pub fn total_payment(&self) -> Result<Money, MoneyError> {
        total_payment(self.hourly_rate, self.hours_worked)
    }

    /// Returns true if `user` submitted this claim
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.lecturer_id == user
    }
}

/// Claim data supplied by a lecturer at submission time
///
/// `status` is whatever the caller sent; submission always overrides it
/// with [`ClaimStatus::PendingReview`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub lecturer_id: UserId,
    pub hours_worked: Decimal,
    pub hourly_rate: Money,
    pub notes: Option<String>,
    pub status: ClaimStatus,
}

impl NewClaim {
    /// Checks hours and rate against the claim limits
    ///
    /// Returns the payout the claim would be worth.
    pub fn check_amounts(&self) -> Result<Money, ClaimError> {
        let hours = self.hours_worked;
        if hours.is_sign_negative() || hours.is_zero() {
            return Err(ClaimError::InvalidClaim(
                "Hours worked must be greater than zero".to_string(),
            ));
        }
        if hours > Decimal::from(MAX_HOURS_WORKED) {
            return Err(ClaimError::InvalidClaim(format!(
                "Hours worked must not exceed {}",
                MAX_HOURS_WORKED
            )));
        }
        if hours.normalize().scale() > HOURS_DECIMAL_PLACES {
            return Err(ClaimError::InvalidClaim(format!(
                "Hours worked must have at most {} decimal places",
                HOURS_DECIMAL_PLACES
            )));
        }
        if !self.hourly_rate.is_positive() {
            return Err(ClaimError::InvalidClaim(
                "Hourly rate must be greater than zero".to_string(),
            ));
        }
        if self.hourly_rate.amount() > Decimal::from(MAX_HOURLY_RATE) {
            return Err(ClaimError::InvalidClaim(format!(
                "Hourly rate must not exceed {}",
                MAX_HOURLY_RATE
            )));
        }
        total_payment(self.hourly_rate, hours)
            .map_err(|e| ClaimError::InvalidClaim(e.to_string()))
    }

    pub fn new(lecturer_id: UserId, hours_worked: Decimal, hourly_rate: Money) -> Self {
        Self {
            lecturer_id,
            hours_worked,
            hourly_rate,
            notes: None,
            status: ClaimStatus::PendingReview,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

fn total_payment(rate: Money, hours: Decimal) -> Result<Money, MoneyError> {
    Ok(rate.multiply(hours)?.round_to_currency())
}

/// Fully-resolved record handed to a [`crate::ports::ClaimStore`] for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaimRecord {
    pub lecturer_id: UserId,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Money,
    pub notes: Option<String>,
    pub document_ref: String,
    pub document_name: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

impl NewClaimRecord {
    /// Materialises the record under a store-assigned id
    pub fn into_claim(self, id: ClaimId) -> Claim {
        Claim {
            id,
            lecturer_id: self.lecturer_id,
            lecturer_name: self.lecturer_name,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            notes: self.notes,
            document_ref: self.document_ref,
            document_name: self.document_name,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
