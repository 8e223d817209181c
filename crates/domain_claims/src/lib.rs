//! Lecturer Claims Domain
//!
//! This crate implements the claim lifecycle for academic staff: a lecturer
//! submits an hours-worked claim with a supporting document, a coordinator
//! verifies it and a manager approves it. Either reviewer may reject.
//!
//! # Claim Lifecycle
//!
//! ```text
//! PendingReview -> VerifiedByCoordinator -> ApprovedByManager
//!       |                  |
//!       +----> Rejected <--+
//! ```
//!
//! Persistence, document storage and user lookup are reached through the
//! port traits in [`ports`]; [`service::ClaimLifecycleService`] orchestrates
//! them.

pub mod claim;
pub mod user;
pub mod document;
pub mod ports;
pub mod dashboard;
pub mod service;
pub mod error;

pub use claim::{
    Claim, ClaimStatus, NewClaim, NewClaimRecord, HOURS_DECIMAL_PLACES, MAX_HOURLY_RATE,
    MAX_HOURS_WORKED,
};
pub use user::{ApplicationUser, Role};
pub use document::{DocumentDescriptor, DocumentError, DocumentValidator, UploadedDocument};
pub use ports::{ClaimStore, DocumentStorage, UserDirectory};
pub use dashboard::{DashboardSummary, RoleDashboard};
pub use service::ClaimLifecycleService;
pub use error::ClaimError;
