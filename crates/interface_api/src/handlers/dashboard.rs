//! Reviewer dashboards

use axum::{extract::State, Extension, Json};

use crate::auth::CurrentUser;
use crate::dto::dashboard::DashboardResponse;
use crate::policy::{authorize, ClaimAction};
use crate::{error::ApiError, AppState};

/// Counts plus the queue of claims awaiting verification
pub async fn coordinator_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DashboardResponse>, ApiError> {
    authorize(&user, ClaimAction::CoordinatorDashboard)?;
    let dashboard = state.service.get_coordinator_dashboard_data().await?;
    Ok(Json(dashboard.try_into()?))
}

/// Counts plus the queue of verified claims awaiting approval
pub async fn manager_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DashboardResponse>, ApiError> {
    authorize(&user, ClaimAction::ManagerDashboard)?;
    let dashboard = state.service.get_manager_dashboard_data().await?;
    Ok(Json(dashboard.try_into()?))
}
