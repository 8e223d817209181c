//! Dashboard DTOs

use serde::{Deserialize, Serialize};

use core_kernel::MoneyError;
use domain_claims::{DashboardSummary, RoleDashboard};

use super::claims::ClaimResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub role: String,
    pub summary: DashboardSummary,
    pub queue: Vec<ClaimResponse>,
}

impl TryFrom<RoleDashboard> for DashboardResponse {
    type Error = MoneyError;

    fn try_from(dashboard: RoleDashboard) -> Result<Self, Self::Error> {
        Ok(Self {
            role: dashboard.role.to_string(),
            summary: dashboard.summary,
            queue: dashboard
                .queue
                .into_iter()
                .map(ClaimResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}
