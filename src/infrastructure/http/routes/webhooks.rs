//! Webhook ingress routes
//!
//! The gateway posts IPN deliveries here. The preflight for this path is
//! answered with open CORS, distinct from the rest of the application.

use std::sync::Arc;
use warp::Filter;

use crate::application::use_cases::ProcessWebhookUseCase;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{handle_webhook, handle_webhook_preflight};
use crate::infrastructure::http::utils::{with_config, with_webhook_use_case};

pub struct WebhookRoutes;

impl WebhookRoutes {
    pub fn create_routes(
        config: AppConfig,
        use_case: Arc<ProcessWebhookUseCase>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let notify = warp::path("webhook")
            .and(warp::post())
            .and(warp::body::content_length_limit(config.server.max_request_size as u64))
            .and(warp::body::json())
            .and(with_webhook_use_case(use_case))
            .and(with_config(config))
            .and_then(handle_webhook);

        let preflight = warp::path("webhook")
            .and(warp::options())
            .and_then(|| handle_webhook_preflight());

        notify.or(preflight)
    }
}
