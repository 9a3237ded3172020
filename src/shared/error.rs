//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway authentication failed: {detail}")]
    Authentication {
        /// Upstream HTTP status of the token endpoint, if a response was received
        status: Option<u16>,
        detail: String,
    },

    #[error("Gateway order submission failed with status {status}: {detail}")]
    GatewaySubmission {
        /// Upstream HTTP status; 500 when no response was received
        status: u16,
        detail: String,
    },

    #[error("Malformed webhook: {0}")]
    MalformedWebhook(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Request too large: {size} bytes exceeds limit of {limit} bytes")]
    RequestTooLarge { size: usize, limit: usize },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Construct a submission failure from an upstream response
    pub fn gateway_submission(status: Option<u16>, detail: impl Into<String>) -> Self {
        AppError::GatewaySubmission {
            status: status.unwrap_or(500),
            detail: detail.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            AppError::GatewaySubmission { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Authentication { .. } => StatusCode::BAD_GATEWAY,
            AppError::MalformedWebhook(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::RequestTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short operator-facing message for the structured error body
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Authentication { .. } | AppError::GatewaySubmission { .. } => {
                "payment processing failed"
            }
            AppError::MalformedWebhook(_) => "invalid webhook payload",
            AppError::Persistence(_) => "failed to record notification",
            AppError::RateLimit => "rate limit exceeded",
            AppError::RequestTooLarge { .. } => "request too large",
            AppError::Validation(_) | AppError::Json(_) => "invalid request",
            _ => "internal server error",
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}
