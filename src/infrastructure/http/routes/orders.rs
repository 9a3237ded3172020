//! Order submission routes

use std::sync::Arc;
use warp::Filter;

use crate::application::use_cases::SubmitOrderUseCase;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::handle_submit_order;
use crate::infrastructure::http::utils::{
    with_config, with_rate_limit_middleware, with_submit_order_use_case,
};
use crate::middleware::rate_limit::RateLimitMiddleware;

pub struct OrdersRoutes;

impl OrdersRoutes {
    pub fn create_routes(
        config: AppConfig,
        use_case: Arc<SubmitOrderUseCase>,
        rate_limit: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("payments")
            .and(warp::path("orders"))
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::body::json())
            .and(warp::header::optional::<String>("x-forwarded-for"))
            .and(with_submit_order_use_case(use_case))
            .and(with_rate_limit_middleware(rate_limit))
            .and(with_config(config))
            .and_then(handle_submit_order)
    }
}
