//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::AppConfig;
use crate::shared::error::AppError;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_gateway_url(&config.pesapal.base_url)?;

        Self::validate_callback_config(&config.callback)?;

        Self::validate_reconciliation_policy(&config.reconciliation.policy)?;

        Self::validate_security_config(&config.security)?;

        Self::validate_rate_limit_config(&config.rate_limit)?;

        Ok(())
    }

    /// Validate gateway base URL
    fn validate_gateway_url(url: &str) -> crate::Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Validation(
                "Gateway base URL must start with http:// or https://".to_string()
            ));
        }

        if url.contains("localhost") || url.contains("127.0.0.1") {
            // Allow localhost for development and tests
            Ok(())
        } else {
            // For real gateway hosts, ensure HTTPS
            if !url.starts_with("https://") {
                return Err(AppError::Validation(
                    "Gateway base URL must use HTTPS".to_string()
                ));
            }
            Ok(())
        }
    }

    /// Validate callback configuration
    fn validate_callback_config(callback: &crate::config::app_config::CallbackConfig) -> crate::Result<()> {
        if callback.environment != "production" && callback.environment != "development" {
            return Err(AppError::Validation(
                format!("Unknown deployment environment: {}", callback.environment)
            ));
        }

        if callback.environment == "production" && !callback.production_url.starts_with("https://") {
            return Err(AppError::Validation(
                "Production callback URL must use HTTPS".to_string()
            ));
        }

        Ok(())
    }

    /// Validate the reconciliation policy string
    fn validate_reconciliation_policy(policy: &str) -> crate::Result<()> {
        policy.parse::<crate::domain::payments::ReconciliationPolicy>()
            .map(|_| ())
            .map_err(AppError::Validation)
    }

    /// Validate security configuration
    fn validate_security_config(security: &crate::config::app_config::SecurityConfig) -> crate::Result<()> {
        // Check for overly permissive CORS settings
        if security.cors_origins.contains(&"*".to_string()) && security.enable_security_headers {
            tracing::warn!("CORS is configured to allow any origin - this may be a security risk in production");
        }

        // Validate CORS methods
        for method in &security.cors_methods {
            if !["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"].contains(&method.as_str()) {
                return Err(AppError::Validation(
                    format!("Invalid CORS method: {}", method)
                ));
            }
        }

        Ok(())
    }

    /// Validate rate limiting configuration
    fn validate_rate_limit_config(rate_limit: &crate::config::app_config::RateLimitConfig) -> crate::Result<()> {
        if rate_limit.enabled {
            if rate_limit.requests_per_minute == 0 {
                return Err(AppError::Validation(
                    "Rate limiting enabled but requests_per_minute is 0".to_string()
                ));
            }

            if rate_limit.burst_size > rate_limit.requests_per_minute {
                return Err(AppError::Validation(
                    "Burst size cannot be greater than requests per minute".to_string()
                ));
            }
        }

        Ok(())
    }
}
