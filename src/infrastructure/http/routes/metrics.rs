//! Metrics routes module
//!
//! This module contains metrics route configurations.

use crate::{
    application::use_cases::GetMetricsUseCase,
    config::AppConfig,
    infrastructure::adapters::MonitoringAdapter,
    infrastructure::http::{
        handlers::{handle_metrics_request, handle_prometheus_request},
        utils::{with_config, with_metrics_use_case, with_monitoring_adapter},
    },
};
use std::sync::Arc;
use warp::Filter;

/// Metrics routes configuration
pub struct MetricsRoutes;

impl MetricsRoutes {
    /// Create the JSON metrics endpoint route
    pub fn create_metrics_route(
        config: AppConfig,
        metrics_use_case: Arc<GetMetricsUseCase>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_metrics_use_case(metrics_use_case))
            .and(with_config(config))
            .and_then(handle_metrics_request)
    }

    /// Create the Prometheus exposition endpoint route
    pub fn create_prometheus_route(
        config: AppConfig,
        monitoring: Arc<MonitoringAdapter>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("metrics")
            .and(warp::path("prometheus"))
            .and(warp::get())
            .and(with_monitoring_adapter(monitoring))
            .and(with_config(config))
            .and_then(handle_prometheus_request)
    }
}
