//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown value for {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

impl CoreError {
    pub fn unknown_value(kind: &'static str, value: impl Into<String>) -> Self {
        CoreError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}
