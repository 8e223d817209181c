//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use rust_decimal::Decimal;

use core_kernel::{Money, UserId};
use domain_claims::{ClaimStatus, NewClaim};

use crate::fixtures::{MoneyFixtures, UserFixtures};

/// Builder for claim submissions
///
/// Defaults to lecturer "user123" claiming 10 hours at R 500.00.
pub struct NewClaimBuilder {
    lecturer_id: UserId,
    hours_worked: Decimal,
    hourly_rate: Money,
    notes: Option<String>,
    status: ClaimStatus,
}

impl Default for NewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimBuilder {
    pub fn new() -> Self {
        Self {
            lecturer_id: UserFixtures::lecturer().id,
            hours_worked: MoneyFixtures::hours(),
            hourly_rate: MoneyFixtures::zar_rate(),
            notes: None,
            status: ClaimStatus::PendingReview,
        }
    }

    pub fn lecturer(mut self, id: impl Into<UserId>) -> Self {
        self.lecturer_id = id.into();
        self
    }

    pub fn hours(mut self, hours: Decimal) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Caller-supplied status; submission is expected to override it
    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            lecturer_id: self.lecturer_id,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            notes: self.notes,
            status: self.status,
        }
    }
}
