//! Security headers middleware

use crate::config::AppConfig;
use serde::Serialize;
use warp::Reply;

/// Security headers middleware
pub struct SecurityHeadersMiddleware {
    config: AppConfig,
}

impl SecurityHeadersMiddleware {
    /// Create a new security headers middleware
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Headers applied to every response when enabled
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        if !self.config.security.enable_security_headers {
            return Vec::new();
        }

        vec![
            (
                "content-security-policy",
                "default-src 'none'; frame-ancestors 'none'",
            ),
            ("x-content-type-options", "nosniff"),
            ("x-frame-options", "DENY"),
            ("referrer-policy", "no-referrer"),
        ]
    }
}

/// Serialize a body to JSON and attach the configured security headers
pub fn create_json_response_with_security_headers<T: Serialize>(
    body: &T,
    middleware: &SecurityHeadersMiddleware,
) -> warp::reply::Response {
    add_security_headers_to_response(warp::reply::json(body), middleware)
}

/// Attach the configured security headers to an existing reply
pub fn add_security_headers_to_response(
    reply: impl Reply,
    middleware: &SecurityHeadersMiddleware,
) -> warp::reply::Response {
    let mut response = reply.into_response();
    for (name, value) in middleware.headers() {
        if let Ok(header_value) = warp::http::HeaderValue::from_str(value) {
            response.headers_mut().insert(name, header_value);
        }
    }
    response
}
