//! Claims repository implementation
//!
//! Database access for lecturer claims: insertion, lookups by owner and
//! status, per-status counts and compare-and-set status updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, lecturer_id, lecturer_name, hours_worked, hourly_rate, currency,
    notes, document_ref, document_name, status, created_at, updated_at
"#;

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier, if it exists
    pub async fn find_by_id(&self, claim_id: i64) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1");
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Retrieves all claims submitted by a lecturer in insertion order
    pub async fn find_by_lecturer(&self, lecturer_id: &str) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE lecturer_id = $1 ORDER BY claim_id"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(lecturer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Retrieves all claims in a status in insertion order
    pub async fn find_by_status(&self, status: ClaimStatus) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE status = $1 ORDER BY claim_id"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Number of claims per status; statuses without claims are omitted
    pub async fn count_by_status(&self) -> Result<Vec<(ClaimStatus, i64)>, DatabaseError> {
        let counts = sqlx::query_as::<_, (ClaimStatus, i64)>(
            "SELECT status, COUNT(*) FROM claims GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Inserts a claim and returns the stored row with its assigned id
    pub async fn insert(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO claims (
                lecturer_id, lecturer_name, hours_worked, hourly_rate, currency,
                notes, document_ref, document_name, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(&claim.lecturer_id)
            .bind(&claim.lecturer_name)
            .bind(claim.hours_worked)
            .bind(claim.hourly_rate)
            .bind(&claim.currency)
            .bind(&claim.notes)
            .bind(&claim.document_ref)
            .bind(&claim.document_name)
            .bind(claim.status)
            .bind(claim.created_at)
            .fetch_one(&self.pool)
            .await?;

        debug!(claim_id = row.claim_id, "Inserted claim row");
        Ok(row)
    }

    /// Moves a claim from `expected` to `status` in a single statement
    ///
    /// # Errors
    ///
    /// * `DatabaseError::NotFound` if the claim does not exist
    /// * `DatabaseError::Conflict` if the claim is no longer in `expected`
    pub async fn update_status(
        &self,
        claim_id: i64,
        expected: ClaimStatus,
        status: ClaimStatus,
    ) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE claims
            SET status = $3, updated_at = $4
            WHERE claim_id = $1 AND status = $2
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .bind(expected)
            .bind(status)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(row) => Ok(row),
            None => match self.find_by_id(claim_id).await? {
                Some(current) => Err(DatabaseError::Conflict(format!(
                    "claim {} is {:?}, expected {:?}",
                    claim_id, current.status, expected
                ))),
                None => Err(DatabaseError::not_found("Claim", claim_id)),
            },
        }
    }
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: i64,
    pub lecturer_id: String,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub notes: Option<String>,
    pub document_ref: String,
    pub document_name: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub lecturer_id: String,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub notes: Option<String>,
    pub document_ref: String,
    pub document_name: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

/// Claim status enum matching the `claim_status` database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatus {
    PendingReview,
    VerifiedByCoordinator,
    ApprovedByManager,
    Rejected,
}
