//! Error types for chat-gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or invalid request input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Daily quota exhausted for the caller's tier
    #[error("Usage limit exceeded: {0}")]
    QuotaExceeded(String),

    /// Upstream completion call failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Usage store read/write failed
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Stored value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// No usage record for the given user
    #[error("User not found: {0}")]
    UserNotFound(String),
}
