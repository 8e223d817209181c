//! Core Kernel - Foundational types for the lecturer claims workflow
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for claims and users
//! - Money types with precise decimal arithmetic
//! - Port infrastructure (errors, marker traits, health checks) for the
//!   hexagonal architecture used by the domain and adapter crates

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{ClaimId, UserId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
