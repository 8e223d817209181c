//! Property-Based Test Generators
//!
//! proptest strategies that produce valid claim inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_claims::{ClaimStatus, Role, UploadedDocument};

/// Strategy for generating any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::PendingReview),
        Just(ClaimStatus::VerifiedByCoordinator),
        Just(ClaimStatus::ApprovedByManager),
        Just(ClaimStatus::Rejected),
    ]
}

/// Strategy for generating any role
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Lecturer),
        Just(Role::Coordinator),
        Just(Role::Manager),
    ]
}

/// Hours in half-hour steps between 0.5 and 744
pub fn hours_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1488).prop_map(|halves| Decimal::new(halves * 5, 1))
}

/// Positive ZAR rates with cents
pub fn rate_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000).prop_map(|cents| Money::new(Decimal::new(cents, 2), Currency::ZAR))
}

/// Documents that pass validation
pub fn valid_document_strategy() -> impl Strategy<Value = UploadedDocument> {
    let types = prop_oneof![
        Just(("pdf", "application/pdf")),
        Just(("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document")),
        Just(("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")),
        Just(("png", "image/png")),
        Just(("jpg", "image/jpeg")),
    ];
    ("[a-z][a-z0-9_]{0,15}", types, 1usize..4096).prop_map(|(stem, (ext, mime), len)| {
        UploadedDocument::new(format!("{}.{}", stem, ext), mime, vec![0u8; len])
    })
}
