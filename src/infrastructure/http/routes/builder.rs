//! Route builder module
//!
//! This module contains the main route builder that orchestrates the creation
//! of all application routes.

use crate::{
    application::use_cases::{
        GetMetricsUseCase, HealthCheckUseCase, ProcessWebhookUseCase, SubmitOrderUseCase,
    },
    config::AppConfig,
    infrastructure::adapters::{MonitoringAdapter, PesapalGatewayClient},
    infrastructure::http::routes::{HealthRoutes, MetricsRoutes, OrdersRoutes, WebhookRoutes},
    middleware::rate_limit::RateLimitMiddleware,
};
use std::sync::Arc;
use warp::Filter;

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    pub fn build_routes(
        config: AppConfig,
        submit_order_use_case: Arc<SubmitOrderUseCase>,
        webhook_use_case: Arc<ProcessWebhookUseCase>,
        metrics_use_case: Arc<GetMetricsUseCase>,
        health_use_case: Arc<HealthCheckUseCase>,
        gateway: Arc<PesapalGatewayClient>,
        monitoring: Arc<MonitoringAdapter>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        // Build individual route groups
        let orders_route = OrdersRoutes::create_routes(
            config.clone(),
            submit_order_use_case,
            rate_limit_middleware,
        );

        let webhook_route = WebhookRoutes::create_routes(
            config.clone(),
            webhook_use_case,
        );

        let health_route = HealthRoutes::create_health_route(
            config.clone(),
            health_use_case,
            gateway,
        );

        let metrics_route = MetricsRoutes::create_metrics_route(
            config.clone(),
            metrics_use_case,
        );

        let prometheus_route = MetricsRoutes::create_prometheus_route(
            config,
            monitoring,
        );

        // Combine all routes
        orders_route
            .or(webhook_route)
            .or(health_route)
            .or(metrics_route)
            .or(prometheus_route)
    }
}
