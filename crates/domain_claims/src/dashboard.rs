//! Dashboard aggregates for reviewers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::claim::{Claim, ClaimStatus};
use crate::user::Role;

/// Claim counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: u64,
    pub pending_review: u64,
    pub verified_by_coordinator: u64,
    pub approved_by_manager: u64,
    pub rejected: u64,
}

impl DashboardSummary {
    /// Builds the summary from per-status counts; `total` is their sum
    pub fn from_counts(counts: &HashMap<ClaimStatus, u64>) -> Self {
        let count = |status: ClaimStatus| counts.get(&status).copied().unwrap_or(0);
        let mut summary = Self {
            total: 0,
            pending_review: count(ClaimStatus::PendingReview),
            verified_by_coordinator: count(ClaimStatus::VerifiedByCoordinator),
            approved_by_manager: count(ClaimStatus::ApprovedByManager),
            rejected: count(ClaimStatus::Rejected),
        };
        summary.total = summary.pending_review
            + summary.verified_by_coordinator
            + summary.approved_by_manager
            + summary.rejected;
        summary
    }

    /// Count for a single status
    pub fn count_of(&self, status: ClaimStatus) -> u64 {
        match status {
            ClaimStatus::PendingReview => self.pending_review,
            ClaimStatus::VerifiedByCoordinator => self.verified_by_coordinator,
            ClaimStatus::ApprovedByManager => self.approved_by_manager,
            ClaimStatus::Rejected => self.rejected,
        }
    }
}

/// What a reviewer sees on their dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDashboard {
    pub role: Role,
    pub summary: DashboardSummary,
    /// Claims waiting on this role
    pub queue: Vec<Claim>,
}
