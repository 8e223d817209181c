//! Custom Test Assertions
//!
//! Assertion helpers that give more meaningful failure messages than a bare
//! `assert!`.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::{Claim, ClaimError, ClaimStatus, DashboardSummary};

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts a claim's status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} is {}, expected {}",
        claim.id, claim.status, expected
    );
}

/// Asserts every claim in `claims` is in `status`
pub fn assert_all_in_status(claims: &[Claim], status: ClaimStatus) {
    if let Some(stray) = claims.iter().find(|c| c.status != status) {
        panic!(
            "Claim {} is {}, expected every claim to be {}",
            stray.id, stray.status, status
        );
    }
}

/// Asserts the summary total equals the sum of its per-status counts
pub fn assert_summary_consistent(summary: &DashboardSummary) {
    let sum: u64 = ClaimStatus::ALL.iter().map(|s| summary.count_of(*s)).sum();
    assert_eq!(
        summary.total, sum,
        "Dashboard total {} does not match per-status sum {}: {:?}",
        summary.total, sum, summary
    );
}

/// Asserts a validation failure carrying `fragment` in its message
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, ClaimError>, fragment: &str) {
    match result {
        Err(e) if e.is_validation() => assert!(
            e.to_string().contains(fragment),
            "Validation message '{}' does not contain '{}'",
            e,
            fragment
        ),
        other => panic!("Expected validation error containing '{}', got {:?}", fragment, other),
    }
}
