//! PostgreSQL Claim Store Adapter
//!
//! Implements [`ClaimStore`] on top of [`ClaimsRepository`]. Status updates
//! are a single conditional `UPDATE`, so two reviewers acting on the same
//! claim cannot both succeed.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimId, Currency, DomainPort, HealthCheckResult, HealthCheckable, Money,
    PortError, UserId,
};
use domain_claims::{Claim, ClaimStatus, ClaimStore, NewClaimRecord};

use crate::repositories::claims::{
    ClaimRow, ClaimStatus as DbClaimStatus, ClaimsRepository, NewClaimRow,
};

const ADAPTER_ID: &str = "postgres-claim-store";

/// PostgreSQL-backed implementation of the ClaimStore port
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::Conflict` -> `PortError::Conflict`
/// - Other errors -> `PortError::Internal` or `PortError::Connection`
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    #[instrument(skip(self, record), fields(lecturer = %record.lecturer_id))]
    async fn insert(&self, record: NewClaimRecord) -> Result<Claim, PortError> {
        let row = self.repository.insert(record_to_row(record)).await?;
        row_to_claim(row)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        debug!("Fetching claim");
        self.repository
            .find_by_id(id.value())
            .await?
            .map(row_to_claim)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, PortError> {
        let rows = self.repository.find_by_lecturer(owner.as_str()).await?;
        rows.into_iter().map(row_to_claim).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
        let rows = self.repository.find_by_status(domain_to_db_status(status)).await?;
        rows.into_iter().map(row_to_claim).collect()
    }

    async fn count_by_status(&self) -> Result<HashMap<ClaimStatus, u64>, PortError> {
        let counts = self.repository.count_by_status().await?;
        Ok(counts
            .into_iter()
            .map(|(status, count)| (db_to_domain_status(status), count.max(0) as u64))
            .collect())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn update_status(
        &self,
        id: ClaimId,
        expected: ClaimStatus,
        status: ClaimStatus,
    ) -> Result<Claim, PortError> {
        let row = self
            .repository
            .update_status(
                id.value(),
                domain_to_db_status(expected),
                domain_to_db_status(status),
            )
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Claim", id)
                } else {
                    e.into()
                }
            })?;
        row_to_claim(row)
    }
}

fn record_to_row(record: NewClaimRecord) -> NewClaimRow {
    NewClaimRow {
        lecturer_id: record.lecturer_id.to_string(),
        lecturer_name: record.lecturer_name,
        hours_worked: record.hours_worked,
        hourly_rate: record.hourly_rate.amount(),
        currency: record.hourly_rate.currency().code().to_string(),
        notes: record.notes,
        document_ref: record.document_ref,
        document_name: record.document_name,
        status: domain_to_db_status(record.status),
        created_at: record.created_at,
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let currency: Currency = row
        .currency
        .trim()
        .parse()
        .map_err(|e| PortError::transformation(format!("claim {}: {}", row.claim_id, e)))?;

    Ok(Claim {
        id: ClaimId::new(row.claim_id),
        lecturer_id: UserId::new(row.lecturer_id),
        lecturer_name: row.lecturer_name,
        hours_worked: row.hours_worked,
        hourly_rate: Money::new(row.hourly_rate, currency),
        notes: row.notes,
        document_ref: row.document_ref,
        document_name: row.document_name,
        status: db_to_domain_status(row.status),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn domain_to_db_status(status: ClaimStatus) -> DbClaimStatus {
    match status {
        ClaimStatus::PendingReview => DbClaimStatus::PendingReview,
        ClaimStatus::VerifiedByCoordinator => DbClaimStatus::VerifiedByCoordinator,
        ClaimStatus::ApprovedByManager => DbClaimStatus::ApprovedByManager,
        ClaimStatus::Rejected => DbClaimStatus::Rejected,
    }
}

fn db_to_domain_status(status: DbClaimStatus) -> ClaimStatus {
    match status {
        DbClaimStatus::PendingReview => ClaimStatus::PendingReview,
        DbClaimStatus::VerifiedByCoordinator => ClaimStatus::VerifiedByCoordinator,
        DbClaimStatus::ApprovedByManager => ClaimStatus::ApprovedByManager,
        DbClaimStatus::Rejected => ClaimStatus::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(currency: &str) -> ClaimRow {
        let now = Utc::now();
        ClaimRow {
            claim_id: 7,
            lecturer_id: "user123".to_string(),
            lecturer_name: "John Doe".to_string(),
            hours_worked: dec!(10),
            hourly_rate: dec!(500),
            currency: currency.to_string(),
            notes: Some("March tutorials".to_string()),
            document_ref: "claims/user123/abc_timesheet.pdf".to_string(),
            document_name: "timesheet.pdf".to_string(),
            status: DbClaimStatus::VerifiedByCoordinator,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_mapping_is_bijective() {
        for status in ClaimStatus::ALL {
            assert_eq!(db_to_domain_status(domain_to_db_status(status)), status);
        }
    }

    #[test]
    fn test_row_to_claim() {
        let claim = row_to_claim(row("ZAR")).unwrap();

        assert_eq!(claim.id, ClaimId::new(7));
        assert_eq!(claim.status, ClaimStatus::VerifiedByCoordinator);
        assert_eq!(claim.hourly_rate.currency(), Currency::ZAR);
        assert_eq!(claim.total_payment().unwrap().amount(), dec!(5000));
    }

    #[test]
    fn test_row_with_unknown_currency_is_rejected() {
        let err = row_to_claim(row("XYZ")).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_record_to_row_splits_money() {
        let record = NewClaimRecord {
            lecturer_id: UserId::from("user123"),
            lecturer_name: "John Doe".to_string(),
            hours_worked: dec!(7.5),
            hourly_rate: Money::new(dec!(420), Currency::USD),
            notes: None,
            document_ref: "ref".to_string(),
            document_name: "doc.pdf".to_string(),
            status: ClaimStatus::PendingReview,
            created_at: Utc::now(),
        };
        let row = record_to_row(record);

        assert_eq!(row.hourly_rate, dec!(420));
        assert_eq!(row.currency, "USD");
        assert_eq!(row.status, DbClaimStatus::PendingReview);
    }
}
