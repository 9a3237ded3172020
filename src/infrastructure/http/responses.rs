//! HTTP responses module
//!
//! This module contains HTTP response formatting and utilities.

use crate::{
    infrastructure::http::models::ErrorBody,
    shared::error::AppError,
};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Build the structured error body for an application error.
    ///
    /// The `error` field is a stable operator-facing message; the upstream
    /// detail rides in `message` for diagnosis.
    pub fn error_body(error: &AppError) -> ErrorBody {
        ErrorBody {
            error: error.public_message().to_string(),
            message: error.to_string(),
        }
    }

    /// Format an application error as a JSON response with its status
    pub fn from_app_error(error: &AppError) -> WithStatus<Json> {
        warp::reply::with_status(
            warp::reply::json(&Self::error_body(error)),
            error.http_status_code(),
        )
    }

    /// Format a health check response
    pub fn health(status: &str, version: &str) -> Json {
        let health_data = serde_json::json!({
            "status": status,
            "version": version,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        warp::reply::json(&health_data)
    }

    /// Format a metrics response
    pub fn metrics(metrics: &serde_json::Value) -> Json {
        warp::reply::json(metrics)
    }
}
