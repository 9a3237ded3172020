//! Metrics handler module
//!
//! This module contains the metrics and Prometheus endpoint handlers for monitoring.

use crate::{
    application::use_cases::GetMetricsUseCase,
    config::AppConfig,
    infrastructure::adapters::MonitoringAdapter,
    middleware::security_headers::{
        add_security_headers_to_response, create_json_response_with_security_headers,
        SecurityHeadersMiddleware,
    },
};
use std::sync::Arc;
use warp::Reply;

/// Handle metrics requests
pub async fn handle_metrics_request(
    metrics_use_case: Arc<GetMetricsUseCase>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let metrics_data = metrics_use_case.execute();

    // Apply security headers only
    let response = create_json_response_with_security_headers(
        &metrics_data,
        &SecurityHeadersMiddleware::new(config),
    );

    Ok(response)
}

/// Handle Prometheus metrics requests
pub async fn handle_prometheus_request(
    monitoring_adapter: Arc<MonitoringAdapter>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let metrics = monitoring_adapter.get_prometheus_metrics();

    // Apply security headers only
    let response = add_security_headers_to_response(
        warp::reply::with_header(
            warp::reply::with_status(metrics, warp::http::StatusCode::OK),
            "Content-Type",
            "text/plain; version=0.0.4; charset=utf-8",
        ),
        &SecurityHeadersMiddleware::new(config),
    );

    Ok(response)
}
