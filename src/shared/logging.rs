//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(level: &str, _format: &str, _structured: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber_builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let subscriber = subscriber_builder.finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }

    /// Log an order submission with structured data
    pub fn log_submission(
        request_id: &str,
        order_id: &str,
        client_ip: &str,
        user_agent: Option<&str>,
    ) {
        info!(
            request_id = %request_id,
            order_id = %order_id,
            client_ip = %client_ip,
            user_agent = user_agent,
            "Submitting order to payment gateway"
        );
    }

    /// Log a webhook delivery
    pub fn log_webhook(request_id: &str, tracking_id: &str, notification_type: &str) {
        info!(
            request_id = %request_id,
            tracking_id = %tracking_id,
            notification_type = %notification_type,
            "Processing gateway webhook notification"
        );
    }

    /// Log a successful response
    pub fn log_success(request_id: &str, operation: &str, duration_ms: u64) {
        info!(
            request_id = %request_id,
            operation = %operation,
            duration_ms = %duration_ms,
            "Request completed successfully"
        );
    }

    /// Log an error response
    pub fn log_error(request_id: &str, operation: &str, error: &crate::shared::error::AppError, duration_ms: u64) {
        error!(
            request_id = %request_id,
            operation = %operation,
            error = %error,
            duration_ms = %duration_ms,
            "Request failed"
        );
    }

    /// Log rate limiting events
    pub fn log_rate_limit(client_ip: &str, limit: u32) {
        warn!(
            client_ip = %client_ip,
            limit = %limit,
            "Rate limit exceeded"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        format!("req_{:x}", now)
    }
}
