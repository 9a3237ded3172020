//! Order submission HTTP handler

use std::sync::Arc;

use warp::Reply;

use crate::application::use_cases::SubmitOrderUseCase;
use crate::config::AppConfig;
use crate::infrastructure::converters::ModelConverter;
use crate::infrastructure::http::models::{RequestContext, SubmitOrderBody};
use crate::infrastructure::http::responses::ResponseFormatter;
use crate::infrastructure::http::utils::extract_and_validate_client_ip;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::middleware::security_headers::{
    create_json_response_with_security_headers, SecurityHeadersMiddleware,
};

pub async fn handle_submit_order(
    body: SubmitOrderBody,
    forwarded_for: Option<String>,
    use_case: Arc<SubmitOrderUseCase>,
    rate_limit: Arc<RateLimitMiddleware>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let security_headers = SecurityHeadersMiddleware::new(config.clone());
    let client_ip =
        extract_and_validate_client_ip(forwarded_for.as_deref().unwrap_or(""), &config);

    if let Err(e) = rate_limit.check_rate_limit(&client_ip) {
        let resp = create_json_response_with_security_headers(
            &ResponseFormatter::error_body(&e),
            &security_headers,
        );
        return Ok(warp::reply::with_status(resp, e.http_status_code()));
    }

    let context = RequestContext::new(client_ip, "payments.submit_order".to_string());
    let client_info = ModelConverter::to_client_info(&context);

    let result = match ModelConverter::to_domain_submission(&body) {
        Ok(submission) => use_case.execute(submission, &client_info).await,
        Err(e) => Err(e),
    };

    let response = match result {
        // Gateway response body passes through verbatim
        Ok(resp) => warp::reply::with_status(
            create_json_response_with_security_headers(&resp, &security_headers),
            warp::http::StatusCode::OK,
        ),
        Err(e) => warp::reply::with_status(
            create_json_response_with_security_headers(
                &ResponseFormatter::error_body(&e),
                &security_headers,
            ),
            e.http_status_code(),
        ),
    };
    Ok(response)
}
