//! CORS configuration
//!
//! The application endpoints restrict origins to the configured storefront
//! hosts. The webhook ingress is the exception: the gateway's IPN delivery
//! must be answered with an open `Access-Control-Allow-Origin: *` preflight,
//! distinct from the rest of the application.

use crate::config::AppConfig;

/// CORS configuration for the application endpoints
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
}

impl CorsConfig {
    /// Create a new CORS configuration
    pub fn new(origins: Vec<String>, methods: Vec<String>, headers: Vec<String>) -> Self {
        Self {
            origins,
            methods,
            headers,
        }
    }

    /// Load CORS configuration from app config
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            origins: config.security.cors_origins.clone(),
            methods: config.security.cors_methods.clone(),
            headers: config.security.cors_headers.clone(),
        }
    }
}

/// CORS middleware
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    /// Create a new CORS middleware
    pub fn new(config: AppConfig) -> Self {
        let cors_config = CorsConfig::from_app_config(&config);
        Self { config: cors_config }
    }

    /// Get CORS configuration
    pub fn get_cors_config(&self) -> &CorsConfig {
        &self.config
    }

    /// Check if CORS allows any origin
    pub fn allows_any_origin(&self) -> bool {
        self.config.origins.contains(&"*".to_string())
    }

    /// Validate CORS configuration
    pub fn validate_config(&self) -> Result<(), String> {
        // Check if origins are valid
        if !self.allows_any_origin() {
            for origin in &self.config.origins {
                if !self.is_valid_origin(origin) {
                    return Err(format!("Invalid CORS origin: {}", origin));
                }
            }
        }

        // Check if methods are valid
        for method in &self.config.methods {
            if method.parse::<warp::http::Method>().is_err() {
                return Err(format!("Invalid CORS method: {}", method));
            }
        }

        // Check if headers are valid
        for header in &self.config.headers {
            if header.is_empty() {
                return Err(format!("Invalid CORS header: {}", header));
            }
        }

        Ok(())
    }

    /// Check if an origin is valid
    fn is_valid_origin(&self, origin: &str) -> bool {
        if origin == "*" {
            return true;
        }

        // Check for valid URL format
        if origin.starts_with("http://") || origin.starts_with("https://") {
            return true;
        }

        false
    }

    /// Get CORS preflight response headers for the application endpoints
    pub fn get_preflight_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        // Access-Control-Allow-Origin
        if self.allows_any_origin() {
            headers.push(("Access-Control-Allow-Origin".to_string(), "*".to_string()));
        } else {
            // For specific origins, this would be set dynamically based on the request origin
            headers.push((
                "Access-Control-Allow-Origin".to_string(),
                self.config.origins.first().cloned().unwrap_or_else(|| "null".to_string()),
            ));
        }

        // Access-Control-Allow-Methods
        let methods = self.config.methods.join(", ");
        headers.push(("Access-Control-Allow-Methods".to_string(), methods));

        // Access-Control-Allow-Headers
        let allowed_headers = self.config.headers.join(", ");
        headers.push(("Access-Control-Allow-Headers".to_string(), allowed_headers));

        // Access-Control-Max-Age
        headers.push(("Access-Control-Max-Age".to_string(), "3600".to_string()));

        headers
    }

    /// Preflight headers for the webhook ingress.
    ///
    /// The gateway delivers IPNs server-to-server; this endpoint is open to
    /// any origin regardless of the application CORS configuration.
    pub fn webhook_preflight_headers() -> Vec<(String, String)> {
        vec![
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "POST, OPTIONS".to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type, Accept".to_string(),
            ),
            ("Access-Control-Max-Age".to_string(), "3600".to_string()),
        ]
    }
}
