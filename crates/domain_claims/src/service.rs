//! Claim lifecycle service
//!
//! Orchestrates document validation, storage, persistence and status
//! transitions. Role-based authorization is not done here: callers decide
//! which role may request which transition. The service does enforce the
//! status transition table, so a claim can never leave a final state.

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use core_kernel::{ClaimId, HealthCheckResult, UserId};

use crate::claim::{Claim, ClaimStatus, NewClaim, NewClaimRecord};
use crate::dashboard::{DashboardSummary, RoleDashboard};
use crate::document::{DocumentError, DocumentValidator, UploadedDocument};
use crate::error::ClaimError;
use crate::ports::{ClaimStore, DocumentStorage, UserDirectory};
use crate::user::Role;

/// Service for submitting and reviewing lecturer claims
pub struct ClaimLifecycleService {
    claims: Arc<dyn ClaimStore>,
    documents: Arc<dyn DocumentStorage>,
    users: Arc<dyn UserDirectory>,
    validator: DocumentValidator,
}

impl ClaimLifecycleService {
    /// Creates a new lifecycle service over the given ports
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        documents: Arc<dyn DocumentStorage>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            claims,
            documents,
            users,
            validator: DocumentValidator::default(),
        }
    }

    /// Submits a new claim
    ///
    /// This method:
    /// 1. Validates the supporting document (presence, size, type)
    /// 2. Validates hours and rate against the claim limits
    /// 3. Forces the status to `PendingReview`
    /// 4. Resolves the lecturer's display name
    /// 5. Stores the document, then inserts the claim
    ///
    /// Nothing is written unless every check passes. If the insert fails,
    /// the stored document is removed again.
    ///
    /// # Returns
    ///
    /// The id assigned by the claim store
    ///
    /// # Errors
    ///
    /// * `ClaimError::InvalidArgument` with the validator's message
    /// * `ClaimError::InvalidClaim` for hours or rate outside the claim limits
    /// * `ClaimError::Port` if a collaborator fails
    #[instrument(skip(self, claim, document), fields(lecturer = %claim.lecturer_id))]
    pub async fn create_claim(
        &self,
        mut claim: NewClaim,
        document: Option<UploadedDocument>,
    ) -> Result<ClaimId, ClaimError> {
        let document = match self.check_document(document) {
            Ok(document) => document,
            Err(e) => {
                warn!(reason = %e, "Rejected claim submission");
                return Err(e.into());
            }
        };
        let total = claim.check_amounts().inspect_err(|e| {
            warn!(reason = %e, "Rejected claim submission");
        })?;

        if claim.status != ClaimStatus::PendingReview {
            warn!(requested = %claim.status, "Ignoring caller-supplied status on submission");
        }
        claim.status = ClaimStatus::PendingReview;

        let lecturer_name = self.resolve_display_name(&claim.lecturer_id).await?;

        let key = storage_key(&claim.lecturer_id, &document.descriptor.file_name);
        let document_ref = self.documents.store(&key, &document.content).await?;

        let record = NewClaimRecord {
            lecturer_id: claim.lecturer_id,
            lecturer_name,
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate,
            notes: claim.notes,
            document_ref: document_ref.clone(),
            document_name: document.descriptor.file_name,
            status: claim.status,
            created_at: Utc::now(),
        };

        match self.claims.insert(record).await {
            Ok(created) => {
                info!(claim_id = %created.id, %total, "Claim submitted");
                Ok(created.id)
            }
            Err(e) => {
                if let Err(cleanup) = self.documents.remove(&document_ref).await {
                    error!(%document_ref, error = %cleanup, "Failed to remove orphaned document");
                }
                Err(e.into())
            }
        }
    }

    /// Retrieves a claim, or `None` if it does not exist
    #[instrument(skip(self))]
    pub async fn get_claim_by_id(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        Ok(self.claims.find(id).await?)
    }

    /// All claims submitted by a user
    #[instrument(skip(self))]
    pub async fn get_claims_for_user(&self, user: &UserId) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.list_by_owner(user).await?)
    }

    /// Claims waiting on `role`
    ///
    /// Coordinators see `PendingReview`, managers see
    /// `VerifiedByCoordinator`; lecturers review nothing.
    #[instrument(skip(self))]
    pub async fn get_pending_claims(&self, role: Role) -> Result<Vec<Claim>, ClaimError> {
        match role.review_stage() {
            Some(status) => Ok(self.claims.list_by_status(status).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Moves a claim to `status`
    ///
    /// # Errors
    ///
    /// * `ClaimError::ClaimNotFound` if the id is unknown
    /// * `ClaimError::InvalidStatusTransition` if the transition table forbids it
    /// * `ClaimError::ConcurrentModification` if another update won the race
    #[instrument(skip(self))]
    pub async fn update_claim_status(
        &self,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, ClaimError> {
        let current = self
            .claims
            .find(id)
            .await?
            .ok_or(ClaimError::ClaimNotFound(id))?;

        let next = current.status.transition_to(status).inspect_err(|e| {
            warn!(claim_id = %id, error = %e, "Refused status change");
        })?;

        match self.claims.update_status(id, current.status, next).await {
            Ok(updated) => {
                info!(claim_id = %id, from = %current.status, to = %next, "Claim status updated");
                Ok(updated)
            }
            Err(e) if e.is_conflict() => Err(ClaimError::ConcurrentModification(id)),
            Err(e) if e.is_not_found() => Err(ClaimError::ClaimNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Counts claims by status, recomputed from the store on every call
    #[instrument(skip(self))]
    pub async fn get_dashboard_summary(&self) -> Result<DashboardSummary, ClaimError> {
        let counts = self.claims.count_by_status().await?;
        Ok(DashboardSummary::from_counts(&counts))
    }

    /// Summary plus the queue of verified claims awaiting approval
    pub async fn get_manager_dashboard_data(&self) -> Result<RoleDashboard, ClaimError> {
        self.dashboard_for(Role::Manager).await
    }

    /// Summary plus the queue of submitted claims awaiting verification
    pub async fn get_coordinator_dashboard_data(&self) -> Result<RoleDashboard, ClaimError> {
        self.dashboard_for(Role::Coordinator).await
    }

    /// Health of the backing claim store
    pub async fn health_check(&self) -> HealthCheckResult {
        self.claims.health_check().await
    }

    async fn dashboard_for(&self, role: Role) -> Result<RoleDashboard, ClaimError> {
        Ok(RoleDashboard {
            role,
            summary: self.get_dashboard_summary().await?,
            queue: self.get_pending_claims(role).await?,
        })
    }

    fn check_document(
        &self,
        document: Option<UploadedDocument>,
    ) -> Result<UploadedDocument, DocumentError> {
        self.validator
            .validate(document.as_ref().map(|d| &d.descriptor))?;
        document.ok_or(DocumentError::MissingDocument)
    }

    async fn resolve_display_name(&self, lecturer: &UserId) -> Result<String, ClaimError> {
        match self.users.find_user(lecturer).await? {
            Some(user) if !user.display_name().is_empty() => Ok(user.display_name()),
            _ => {
                warn!(%lecturer, "No display name for lecturer, using id");
                Ok(lecturer.to_string())
            }
        }
    }
}

/// `claims/<lecturer>/<uuid>_<file name>`, with path separators and other
/// unsafe characters replaced
fn storage_key(lecturer: &UserId, file_name: &str) -> String {
    let base_name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");
    format!(
        "claims/{}/{}_{}",
        sanitize(lecturer.as_str()),
        Uuid::new_v4().simple(),
        sanitize(base_name)
    )
}

fn sanitize(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}
