//! Health routes module
//!
//! This module contains health check route configurations.

use crate::{
    application::use_cases::HealthCheckUseCase,
    config::AppConfig,
    infrastructure::adapters::PesapalGatewayClient,
    infrastructure::http::{
        handlers::handle_health_request,
        utils::{with_config, with_gateway_client, with_health_use_case},
    },
};
use std::sync::Arc;
use warp::Filter;

/// Health routes configuration
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check endpoint route
    pub fn create_health_route(
        config: AppConfig,
        health_use_case: Arc<HealthCheckUseCase>,
        gateway: Arc<PesapalGatewayClient>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("health")
            .and(warp::get())
            .and(with_health_use_case(health_use_case))
            .and(with_config(config))
            .and(with_gateway_client(gateway))
            .and_then(|use_case, config, gateway| {
                handle_health_request(use_case, config, Some(gateway))
            })
    }
}
