//! HTTP utilities - Common helper functions
//!
//! This module contains utility functions used across the HTTP infrastructure
//! for IP validation, route injection, and other common operations.

use crate::application::use_cases::{
    GetMetricsUseCase, HealthCheckUseCase, ProcessWebhookUseCase, SubmitOrderUseCase,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::{MonitoringAdapter, PesapalGatewayClient};
use crate::middleware::rate_limit::RateLimitMiddleware;
use std::sync::Arc;
use warp::Filter;

/// Extract and validate client IP from various sources
pub fn extract_and_validate_client_ip(raw_ip: &str, config: &AppConfig) -> String {
    // If the IP is empty or invalid, return a default
    if raw_ip.is_empty() || raw_ip == "unknown" {
        return "127.0.0.1".to_string();
    }

    // The X-Forwarded-For value may carry a chain; the first hop is the client
    let first_hop = raw_ip.split(',').next().unwrap_or(raw_ip).trim();

    // Parse the IP to validate it
    if let Ok(ip) = first_hop.parse::<std::net::IpAddr>() {
        // Check whether we should trust forwarded addresses at all
        if config.security.trusted_proxy_headers.contains(&"X-Forwarded-For".to_string()) {
            return ip.to_string();
        } else if ip.is_loopback() {
            return ip.to_string();
        } else {
            return "127.0.0.1".to_string();
        }
    }

    // If parsing failed, return default
    "127.0.0.1".to_string()
}

/// Helper function to inject the order submission use case into a route
pub fn with_submit_order_use_case(
    use_case: Arc<SubmitOrderUseCase>,
) -> impl Filter<Extract = (Arc<SubmitOrderUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || use_case.clone())
}

/// Helper function to inject the webhook use case into a route
pub fn with_webhook_use_case(
    use_case: Arc<ProcessWebhookUseCase>,
) -> impl Filter<Extract = (Arc<ProcessWebhookUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || use_case.clone())
}

/// Helper function to inject health use case into route
pub fn with_health_use_case(
    health_use_case: Arc<HealthCheckUseCase>,
) -> impl Filter<Extract = (Arc<HealthCheckUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || health_use_case.clone())
}

/// Helper function to inject metrics use case into route
pub fn with_metrics_use_case(
    metrics_use_case: Arc<GetMetricsUseCase>,
) -> impl Filter<Extract = (Arc<GetMetricsUseCase>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || metrics_use_case.clone())
}

/// Helper function to inject the gateway client into a route
pub fn with_gateway_client(
    gateway: Arc<PesapalGatewayClient>,
) -> impl Filter<Extract = (Arc<PesapalGatewayClient>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || gateway.clone())
}

/// Helper function to inject the monitoring adapter into a route
pub fn with_monitoring_adapter(
    monitoring: Arc<MonitoringAdapter>,
) -> impl Filter<Extract = (Arc<MonitoringAdapter>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || monitoring.clone())
}

/// Helper function to inject configuration into route
pub fn with_config(
    config: AppConfig,
) -> impl Filter<Extract = (AppConfig,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// Helper function to inject rate limiting middleware into route
pub fn with_rate_limit_middleware(
    rate_limit_middleware: Arc<RateLimitMiddleware>,
) -> impl Filter<Extract = (Arc<RateLimitMiddleware>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || rate_limit_middleware.clone())
}
