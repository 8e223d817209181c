//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use crate::claim::ClaimStatus;
use crate::document::DocumentError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// The submitted document was rejected; carries the validator's message
    #[error(transparent)]
    InvalidArgument(#[from] DocumentError),

    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("Claim {0} was modified by another reviewer")]
    ConcurrentModification(ClaimId),

    #[error("Storage error: {0}")]
    Port(#[from] PortError),
}

impl ClaimError {
    /// Returns true for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, ClaimError::InvalidArgument(_) | ClaimError::InvalidClaim(_))
    }

    /// Returns true if the claim does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::ClaimNotFound(_))
    }
}
