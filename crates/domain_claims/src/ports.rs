//! Claims Domain Ports
//!
//! Port interfaces the lifecycle service depends on. Each has a PostgreSQL
//! or filesystem adapter in `infra_db` and an in-memory mock (feature
//! `mock`) for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ClaimLifecycleService;
//! use std::sync::Arc;
//!
//! let service = ClaimLifecycleService::new(
//!     Arc::new(PostgresClaimStore::new(pool.clone())),
//!     Arc::new(LocalDocumentStorage::new("./uploads").await?),
//!     Arc::new(PostgresUserDirectory::new(pool)),
//! );
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError, UserId};

use crate::claim::{Claim, ClaimStatus, NewClaimRecord};
use crate::user::ApplicationUser;

/// Durable mapping from claim id to claim record
///
/// Every write touches exactly one record and is atomic with respect to it.
#[async_trait]
pub trait ClaimStore: DomainPort + HealthCheckable {
    /// Inserts a claim and returns it with its newly assigned id
    async fn insert(&self, record: NewClaimRecord) -> Result<Claim, PortError>;

    /// Looks a claim up by id
    async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// All claims submitted by `owner`, oldest first
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, PortError>;

    /// All claims currently in `status`, oldest first
    async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError>;

    /// Number of claims per status; statuses with no claims may be absent
    async fn count_by_status(&self) -> Result<HashMap<ClaimStatus, u64>, PortError>;

    /// Moves a claim from `expected` to `status`
    ///
    /// # Errors
    ///
    /// * `PortError::NotFound` if the claim does not exist
    /// * `PortError::Conflict` if its current status is not `expected`
    async fn update_status(
        &self,
        id: ClaimId,
        expected: ClaimStatus,
        status: ClaimStatus,
    ) -> Result<Claim, PortError>;
}

/// Physical storage for supporting documents
#[async_trait]
pub trait DocumentStorage: DomainPort {
    /// Persists `content` under `key` and returns the reference to record on the claim
    async fn store(&self, key: &str, content: &[u8]) -> Result<String, PortError>;

    /// Deletes a stored document; missing documents are not an error
    async fn remove(&self, reference: &str) -> Result<(), PortError>;
}

/// Read-only view of the identity provider's users
#[async_trait]
pub trait UserDirectory: DomainPort {
    async fn find_user(&self, id: &UserId) -> Result<Option<ApplicationUser>, PortError>;
}

/// In-memory adapters
///
/// Useful for unit and HTTP tests that should not need a database or disk.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default)]
    struct ClaimTable {
        rows: BTreeMap<ClaimId, Claim>,
        last_id: i64,
    }

    /// In-memory claim store
    #[derive(Debug, Default)]
    pub struct MockClaimStore {
        table: Arc<RwLock<ClaimTable>>,
        reject_inserts: AtomicBool,
        race_to: Mutex<Option<ClaimStatus>>,
    }

    impl MockClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose inserts always fail, for exercising error paths
        pub fn rejecting_inserts() -> Self {
            let store = Self::new();
            store.reject_inserts.store(true, Ordering::SeqCst);
            store
        }

        /// A store where another writer moves the next claim read through
        /// `find` to `status` straight after it is returned
        ///
        /// The caller sees the old status, so its next compare-and-set fails.
        pub fn racing(status: ClaimStatus) -> Self {
            let store = Self::new();
            if let Ok(mut race_to) = store.race_to.lock() {
                *race_to = Some(status);
            }
            store
        }

        /// Number of stored claims
        pub async fn len(&self) -> usize {
            self.table.read().await.rows.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl HealthCheckable for MockClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                message: Some("Mock adapter always healthy".to_string()),
                ..HealthCheckResult::healthy("mock-claim-store")
            }
        }
    }

    #[async_trait]
    impl ClaimStore for MockClaimStore {
        async fn insert(&self, record: NewClaimRecord) -> Result<Claim, PortError> {
            if self.reject_inserts.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock store is rejecting inserts"));
            }
            let mut table = self.table.write().await;
            table.last_id += 1;
            let claim = record.into_claim(ClaimId::new(table.last_id));
            table.rows.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn find(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            let mut table = self.table.write().await;
            let found = table.rows.get(&id).cloned();
            if let Some(row) = table.rows.get_mut(&id) {
                if let Some(status) = self.race_to.lock().ok().and_then(|mut r| r.take()) {
                    row.status = status;
                    row.updated_at = Utc::now();
                }
            }
            Ok(found)
        }

        async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, PortError> {
            let table = self.table.read().await;
            Ok(table.rows.values().filter(|c| c.is_owned_by(owner)).cloned().collect())
        }

        async fn list_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
            let table = self.table.read().await;
            Ok(table.rows.values().filter(|c| c.status == status).cloned().collect())
        }

        async fn count_by_status(&self) -> Result<HashMap<ClaimStatus, u64>, PortError> {
            let table = self.table.read().await;
            let mut counts = HashMap::new();
            for claim in table.rows.values() {
                *counts.entry(claim.status).or_insert(0) += 1;
            }
            Ok(counts)
        }

        async fn update_status(
            &self,
            id: ClaimId,
            expected: ClaimStatus,
            status: ClaimStatus,
        ) -> Result<Claim, PortError> {
            let mut table = self.table.write().await;
            let claim = table
                .rows
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;
            if claim.status != expected {
                return Err(PortError::conflict(format!(
                    "claim {} is {}, expected {}",
                    id, claim.status, expected
                )));
            }
            claim.status = status;
            claim.updated_at = Utc::now();
            Ok(claim.clone())
        }
    }

    /// In-memory document storage
    #[derive(Debug, Default)]
    pub struct MockDocumentStorage {
        documents: RwLock<HashMap<String, Vec<u8>>>,
    }

    impl MockDocumentStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn contains(&self, reference: &str) -> bool {
            self.documents.read().await.contains_key(reference)
        }

        pub async fn len(&self) -> usize {
            self.documents.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    impl DomainPort for MockDocumentStorage {}

    #[async_trait]
    impl DocumentStorage for MockDocumentStorage {
        async fn store(&self, key: &str, content: &[u8]) -> Result<String, PortError> {
            self.documents
                .write()
                .await
                .insert(key.to_string(), content.to_vec());
            Ok(key.to_string())
        }

        async fn remove(&self, reference: &str) -> Result<(), PortError> {
            self.documents.write().await.remove(reference);
            Ok(())
        }
    }

    /// In-memory user directory
    #[derive(Debug, Default)]
    pub struct MockUserDirectory {
        users: RwLock<HashMap<UserId, ApplicationUser>>,
    }

    impl MockUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with users for testing
        pub fn with_users(users: Vec<ApplicationUser>) -> Self {
            let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
            Self {
                users: RwLock::new(users),
            }
        }

        pub async fn add_user(&self, user: ApplicationUser) {
            self.users.write().await.insert(user.id.clone(), user);
        }
    }

    impl DomainPort for MockUserDirectory {}

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_user(&self, id: &UserId) -> Result<Option<ApplicationUser>, PortError> {
            Ok(self.users.read().await.get(id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use chrono::Utc;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    fn record(owner: &str) -> NewClaimRecord {
        NewClaimRecord {
            lecturer_id: UserId::from(owner),
            lecturer_name: "John Doe".to_string(),
            hours_worked: dec!(10),
            hourly_rate: Money::new(dec!(500), Currency::ZAR),
            notes: None,
            document_ref: "claims/doc.pdf".to_string(),
            document_name: "doc.pdf".to_string(),
            status: ClaimStatus::PendingReview,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_store_assigns_increasing_ids() {
        let store = MockClaimStore::new();
        let first = store.insert(record("a")).await.unwrap();
        let second = store.insert(record("b")).await.unwrap();

        assert_eq!(first.id, ClaimId::new(1));
        assert_eq!(second.id, ClaimId::new(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_mock_store_compare_and_set() {
        let store = MockClaimStore::new();
        let claim = store.insert(record("a")).await.unwrap();

        let stale = store
            .update_status(claim.id, ClaimStatus::VerifiedByCoordinator, ClaimStatus::Rejected)
            .await;
        assert!(stale.unwrap_err().is_conflict());

        let updated = store
            .update_status(claim.id, ClaimStatus::PendingReview, ClaimStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_racing_store_changes_status_after_read() {
        let store = MockClaimStore::racing(ClaimStatus::Rejected);
        let claim = store.insert(record("a")).await.unwrap();

        let seen = store.find(claim.id).await.unwrap().unwrap();
        assert_eq!(seen.status, ClaimStatus::PendingReview);

        let result = store
            .update_status(claim.id, seen.status, ClaimStatus::VerifiedByCoordinator)
            .await;
        assert!(result.unwrap_err().is_conflict());

        let current = store.find(claim.id).await.unwrap().unwrap();
        assert_eq!(current.status, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_mock_store_not_found() {
        let store = MockClaimStore::new();
        let result = store
            .update_status(ClaimId::new(99), ClaimStatus::PendingReview, ClaimStatus::Rejected)
            .await;
        assert!(result.unwrap_err().is_not_found());
        assert!(store.find(ClaimId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_document_storage_remove() {
        let storage = MockDocumentStorage::new();
        let reference = storage.store("k", b"abc").await.unwrap();
        assert!(storage.contains(&reference).await);

        storage.remove(&reference).await.unwrap();
        storage.remove(&reference).await.unwrap();
        assert!(storage.is_empty().await);
    }
}
