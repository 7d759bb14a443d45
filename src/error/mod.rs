//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.
//! Search operations never surface these to callers; they are logged and
//! turned into "no contribution" at the branch that failed.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An outbound call exceeded its deadline.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// External token index returned an error or an unexpected payload.
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// Chain id is not part of the registry.
    #[error("Unknown chain: {0}")]
    UnknownChain(u64),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for AppError {
    fn from(err: alloy::sol_types::Error) -> Self {
        AppError::Rpc(format!("ABI decode failed: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else {
            AppError::ExternalApi(err.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidAddress(_) | AppError::Parse(_) | AppError::UnknownChain(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            AppError::Config(_) => McpError::invalid_request(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
