//! Request handlers

pub mod claims;
pub mod dashboard;
pub mod health;
