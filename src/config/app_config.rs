//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

/// PesaPal gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PesapalConfig {
    /// Gateway API base URL
    #[validate(url)]
    pub base_url: String,

    /// OAuth consumer key
    #[validate(length(min = 1))]
    pub consumer_key: String,

    /// OAuth consumer secret
    #[validate(length(min = 1))]
    pub consumer_secret: String,

    /// Pre-registered IPN subscription identifier
    #[validate(length(min = 1))]
    pub notification_id: String,

    /// Order submission timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub submit_timeout_seconds: u64,

    /// Token request timeout in seconds
    #[validate(range(min = 1, max = 60))]
    pub token_timeout_seconds: u64,
}

/// Callback URL configuration
///
/// The callback URL is resolved once at startup: the production URL when
/// running in a production deployment, the local URL otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CallbackConfig {
    /// Deployment environment: "production" or "development"
    #[validate(length(min = 1))]
    pub environment: String,

    /// Callback URL used in production deployments
    #[validate(url)]
    pub production_url: String,

    /// Callback URL used outside production
    #[validate(url)]
    pub local_url: String,
}

impl CallbackConfig {
    /// Resolve the effective callback URL for this deployment
    pub fn resolve(&self) -> &str {
        if self.environment == "production" {
            &self.production_url
        } else {
            &self.local_url
        }
    }
}

/// Webhook reconciliation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReconciliationConfig {
    /// Status-resolution policy: "trust_webhook" or "verify_with_gateway"
    #[validate(length(min = 1))]
    pub policy: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,

    /// Worker threads (0 for auto-detect)
    #[validate(range(min = 0, max = 64))]
    pub worker_threads: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecurityConfig {
    /// Allowed CORS origins for the application endpoints
    pub cors_origins: Vec<String>,

    /// Allowed CORS methods
    pub cors_methods: Vec<String>,

    /// Allowed CORS headers
    pub cors_headers: Vec<String>,

    /// Enable request logging
    pub enable_request_logging: bool,

    /// Enable security headers
    pub enable_security_headers: bool,

    /// Trusted proxy headers
    pub trusted_proxy_headers: Vec<String>,

    /// Development mode - relaxes local-only restrictions
    pub development_mode: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Requests per minute per IP
    #[validate(range(min = 1, max = 10000))]
    pub requests_per_minute: u32,

    /// Burst size
    #[validate(range(min = 1, max = 1000))]
    pub burst_size: u32,

    /// Enable rate limiting
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    #[validate(length(min = 1))]
    pub format: String,

    /// Enable structured logging
    pub structured: bool,
}

/// Transaction store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreConfig {
    /// Enable the Redis backing store (in-memory only when disabled)
    pub enabled: bool,

    /// Redis connection URL
    #[validate(url)]
    pub redis_url: String,

    /// Retention for transaction records in hours
    #[validate(range(min = 1, max = 8760))]
    pub retention_hours: u64,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// PesaPal gateway configuration
    pub pesapal: PesapalConfig,

    /// Callback URL configuration
    pub callback: CallbackConfig,

    /// Webhook reconciliation configuration
    pub reconciliation: ReconciliationConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Security configuration
    pub security: SecurityConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Transaction store configuration
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pesapal: PesapalConfig {
                base_url: "https://cybqa.pesapal.com/pesapalv3".to_string(),
                consumer_key: "your-consumer-key".to_string(),
                consumer_secret: "your-consumer-secret".to_string(),
                notification_id: "your-ipn-subscription-id".to_string(),
                submit_timeout_seconds: 30,
                token_timeout_seconds: 15,
            },
            callback: CallbackConfig {
                environment: "development".to_string(),
                production_url: "https://shop.example.com/payment-callback".to_string(),
                local_url: "http://localhost:3000/payment-callback".to_string(),
            },
            reconciliation: ReconciliationConfig {
                policy: "trust_webhook".to_string(),
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".parse().unwrap(),
                port: 8080,
                max_request_size: 1024 * 1024, // 1MB
                worker_threads: 0,             // Auto-detect
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string()],
                cors_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
                cors_headers: vec![
                    "Content-Type".to_string(),
                    "Authorization".to_string(),
                    "Accept".to_string(),
                ],
                enable_request_logging: true,
                enable_security_headers: true,
                trusted_proxy_headers: vec!["X-Forwarded-For".to_string()],
                development_mode: false,
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 1000,
                burst_size: 100,
                enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                structured: true,
            },
            store: StoreConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            retention_hours: 48,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("PESAPAL").separator("__"))
            .build()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config.try_deserialize()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        // Validate configuration
        config.validate_config()
            .map_err(|e| crate::shared::error::AppError::Validation(format!("Configuration validation failed: {}", e)))?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.pesapal.validate()?;
        self.callback.validate()?;
        self.reconciliation.validate()?;
        self.server.validate()?;
        self.security.validate()?;
        self.rate_limit.validate()?;
        self.logging.validate()?;
        self.store.validate()?;

        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// The callback URL injected into every order submission
    pub fn callback_url(&self) -> &str {
        self.callback.resolve()
    }

    /// Check if CORS is configured for any origin
    pub fn cors_allow_any_origin(&self) -> bool {
        self.security.cors_origins.contains(&"*".to_string())
    }
}
