//! Error handling module
//!
//! Centralized error type for the crate and its stable error codes.

use serde::Serialize;

/// Crate-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    // Lookup errors
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    // Collaborator errors
    #[error("Ledger source error: {0}")]
    Source(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error body for callers that surface errors over an API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LedgerError {
    /// Stable snake_case code identifying the failure
    pub fn error_code(&self) -> &'static str {
        use crate::domain::DomainError;

        match self {
            LedgerError::GroupNotFound(_) => "group_not_found",
            LedgerError::InvalidRequest(_) => "invalid_request",
            LedgerError::Domain(domain_err) => match domain_err {
                DomainError::InvalidAmount(_) => "invalid_amount",
                DomainError::NegativeAmount(_) => "negative_amount",
                DomainError::NegativeSplit { .. } => "negative_split",
                DomainError::EmptySplits => "empty_splits",
                DomainError::SplitMismatch { .. } => "split_mismatch",
                DomainError::SelfTransaction(_) => "self_transaction",
                DomainError::NonPositiveAmount(_) => "non_positive_amount",
                DomainError::ConservationViolated { .. } => "conservation_violated",
            },
            LedgerError::Source(_) => "source_error",
            LedgerError::Serialization(_) => "serialization_error",
            LedgerError::Config(_) => "config_error",
        }
    }

    /// Check if the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        match self {
            LedgerError::GroupNotFound(_) | LedgerError::InvalidRequest(_) => true,
            LedgerError::Domain(domain_err) => domain_err.is_client_error(),
            LedgerError::Source(_) | LedgerError::Serialization(_) | LedgerError::Config(_) => {
                false
            }
        }
    }

    /// Build the response body, logging server-side failures
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            LedgerError::GroupNotFound(id) => Some(id.clone()),
            LedgerError::InvalidRequest(msg) => Some(msg.clone()),
            LedgerError::Domain(domain_err) => Some(domain_err.to_string()),
            LedgerError::Source(msg) => {
                tracing::error!("Ledger source error: {}", msg);
                None
            }
            LedgerError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                None
            }
            LedgerError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                None
            }
        };

        ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
            details,
        }
    }
}
