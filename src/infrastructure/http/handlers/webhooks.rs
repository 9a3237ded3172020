//! Webhook ingress HTTP handlers
//!
//! The webhook endpoint is gateway-facing: responses carry an open
//! `Access-Control-Allow-Origin` regardless of the application CORS
//! configuration, and the preflight is answered for this endpoint alone.

use std::sync::Arc;

use warp::Reply;

use crate::application::use_cases::ProcessWebhookUseCase;
use crate::config::AppConfig;
use crate::infrastructure::converters::ModelConverter;
use crate::infrastructure::http::models::WebhookPayload;
use crate::infrastructure::http::responses::ResponseFormatter;
use crate::middleware::cors::CorsMiddleware;
use crate::middleware::security_headers::{
    create_json_response_with_security_headers, SecurityHeadersMiddleware,
};

pub async fn handle_webhook(
    payload: WebhookPayload,
    use_case: Arc<ProcessWebhookUseCase>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let security_headers = SecurityHeadersMiddleware::new(config);

    let notification = ModelConverter::to_domain_notification(&payload);
    let result = use_case.execute(notification).await;

    let response = match result {
        Ok(ack) => warp::reply::with_status(
            with_open_cors(create_json_response_with_security_headers(
                &ack,
                &security_headers,
            )),
            warp::http::StatusCode::OK,
        ),
        Err(e) => warp::reply::with_status(
            with_open_cors(create_json_response_with_security_headers(
                &ResponseFormatter::error_body(&e),
                &security_headers,
            )),
            e.http_status_code(),
        ),
    };
    Ok(response)
}

/// Answer the CORS preflight for the webhook endpoint
pub async fn handle_webhook_preflight() -> Result<impl Reply, warp::reject::Rejection> {
    let mut response = warp::reply::reply().into_response();
    *response.status_mut() = warp::http::StatusCode::NO_CONTENT;

    for (name, value) in CorsMiddleware::webhook_preflight_headers() {
        if let (Ok(header_name), Ok(header_value)) = (
            warp::http::header::HeaderName::from_bytes(name.as_bytes()),
            warp::http::HeaderValue::from_str(&value),
        ) {
            response.headers_mut().insert(header_name, header_value);
        }
    }

    Ok(response)
}

fn with_open_cors(mut response: warp::reply::Response) -> warp::reply::Response {
    if let Ok(value) = warp::http::HeaderValue::from_str("*") {
        response
            .headers_mut()
            .insert("access-control-allow-origin", value);
    }
    response
}
