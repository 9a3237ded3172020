//! Health check handler module
//!
//! This module contains the health check endpoint handler for monitoring system status.

use crate::{
    application::use_cases::HealthCheckUseCase,
    config::AppConfig,
    infrastructure::adapters::PesapalGatewayClient,
    middleware::security_headers::{
        create_json_response_with_security_headers, SecurityHeadersMiddleware,
    },
};
use std::sync::Arc;
use warp::Reply;

/// Handle health check requests
pub async fn handle_health_request(
    health_use_case: Arc<HealthCheckUseCase>,
    config: AppConfig,
    gateway: Option<Arc<PesapalGatewayClient>>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let health_response = health_use_case
        .execute(gateway)
        .await
        .map_err(|_| warp::reject::not_found())?;

    // Apply security headers only
    let response = create_json_response_with_security_headers(
        &health_response,
        &SecurityHeadersMiddleware::new(config),
    );

    Ok(response)
}
