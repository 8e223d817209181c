//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! lecturer claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for users, documents and money
//! - `builders`: Builder patterns for test data construction
//! - `harness`: A lifecycle service wired to in-memory adapters
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod harness;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use harness::*;
pub use assertions::*;
pub use generators::*;
