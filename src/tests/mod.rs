//! Test suite for the PesaPal gateway server
//!
//! This module provides the testing framework covering:
//! - Unit tests for the gateway client and services
//! - Integration tests for the HTTP endpoints
//! - Mock gateway and fixture utilities

pub mod common;
pub mod fixtures;
pub mod integration;
pub mod unit;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            // Initialize tracing for tests
            tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();

        // Configure for testing
        config.server.port = 0; // Use random port
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.security.development_mode = true;
        config.store.enabled = false; // In-memory store for tests
        config.rate_limit.enabled = false; // Disable rate limiting for tests
        config.callback.local_url = "https://site/payment-callback".to_string();

        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
