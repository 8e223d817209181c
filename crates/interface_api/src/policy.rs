//! Role policy for claim actions
//!
//! Which role may perform which action is decided here, before any service
//! call. The lifecycle service separately refuses transitions its status
//! table does not allow.

use domain_claims::Role;

use crate::auth::CurrentUser;
use crate::error::ApiError;

/// Actions exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimAction {
    Index,
    Create,
    ViewDetails,
    Verify,
    Approve,
    Reject,
    CoordinatorDashboard,
    ManagerDashboard,
}

impl ClaimAction {
    pub const ALL: [ClaimAction; 8] = [
        ClaimAction::Index,
        ClaimAction::Create,
        ClaimAction::ViewDetails,
        ClaimAction::Verify,
        ClaimAction::Approve,
        ClaimAction::Reject,
        ClaimAction::CoordinatorDashboard,
        ClaimAction::ManagerDashboard,
    ];
}

/// The policy table
pub fn is_allowed(action: ClaimAction, role: Role) -> bool {
    use ClaimAction::*;
    match action {
        Index | ViewDetails => true,
        Create => role == Role::Lecturer,
        Verify | CoordinatorDashboard => role == Role::Coordinator,
        Approve | ManagerDashboard => role == Role::Manager,
        Reject => matches!(role, Role::Coordinator | Role::Manager),
    }
}

/// Fails with `ApiError::Forbidden` unless `user` may perform `action`
pub fn authorize(user: &CurrentUser, action: ClaimAction) -> Result<(), ApiError> {
    if is_allowed(action, user.role) {
        Ok(())
    } else {
        tracing::warn!(user = %user.user_id, role = %user.role, ?action, "Action denied by role policy");
        Err(ApiError::Forbidden(format!(
            "{} may not perform {:?}",
            user.role, action
        )))
    }
}
