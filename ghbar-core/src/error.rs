//! Core error types for `ghbar`.

use thiserror::Error;

/// Core error type for `ghbar` operations.
///
/// Raised while setting a provider up; a running poll never fails.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
