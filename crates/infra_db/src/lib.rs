//! Infrastructure Layer
//!
//! Adapters that back the claims domain ports with real infrastructure:
//!
//! - **PostgreSQL** (via SQLx): [`adapters::PostgresClaimStore`] and
//!   [`adapters::PostgresUserDirectory`], built on the row-level
//!   repositories in [`repositories`]
//! - **Local filesystem**: [`storage::LocalDocumentStorage`] for supporting
//!   documents
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClaimStore;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;
pub mod storage;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use storage::LocalDocumentStorage;
