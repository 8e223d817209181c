//! Domain Adapters
//!
//! PostgreSQL implementations of the claims domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_claims::ClaimStore;
//!
//! let store = PostgresClaimStore::new(pool);
//! let claim = store.find(claim_id).await?;
//! ```

pub mod claims;
pub mod users;

pub use claims::PostgresClaimStore;
pub use users::PostgresUserDirectory;
