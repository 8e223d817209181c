//! Service harness over the in-memory adapters

use std::sync::Arc;

use domain_claims::ports::mock::{MockClaimStore, MockDocumentStorage, MockUserDirectory};
use domain_claims::ClaimLifecycleService;

use crate::fixtures::UserFixtures;

/// A lifecycle service plus handles on the mocks behind it
pub struct ServiceHarness {
    pub service: Arc<ClaimLifecycleService>,
    pub claims: Arc<MockClaimStore>,
    pub documents: Arc<MockDocumentStorage>,
    pub users: Arc<MockUserDirectory>,
}

impl ServiceHarness {
    /// Harness whose directory knows every [`UserFixtures`] user
    pub fn new() -> Self {
        Self::with_store(MockClaimStore::new())
    }

    /// Harness over a specific claim store (e.g. one that rejects inserts)
    pub fn with_store(store: MockClaimStore) -> Self {
        let claims = Arc::new(store);
        let documents = Arc::new(MockDocumentStorage::new());
        let users = Arc::new(MockUserDirectory::with_users(UserFixtures::all()));
        let service = Arc::new(ClaimLifecycleService::new(
            claims.clone(),
            documents.clone(),
            users.clone(),
        ));
        Self {
            service,
            claims,
            documents,
            users,
        }
    }
}

impl Default for ServiceHarness {
    fn default() -> Self {
        Self::new()
    }
}
