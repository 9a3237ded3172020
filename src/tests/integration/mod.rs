//! Integration tests for the HTTP endpoints, driven through the full
//! route stack with a mock gateway behind it

use crate::infrastructure::http::server::create_test_routes;
use crate::tests::common::{config_for_gateway, spawn_mock_gateway, MockGatewayBehavior};
use crate::tests::fixtures;
use serde_json::Value;

#[tokio::test]
async fn test_submit_order_passes_gateway_response_through() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/payments/orders")
        .json(&fixtures::order_body())
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["order_tracking_id"], "T-100");
    assert_eq!(body["redirect_url"], "https://pay.pesapal.com/iframe");
}

#[tokio::test]
async fn test_submit_order_overrides_caller_callback_fields() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let config = config_for_gateway(&gateway);
    let notification_id = config.pesapal.notification_id.clone();
    let routes = create_test_routes(config).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/payments/orders")
        .json(&fixtures::adversarial_order_body())
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::OK);

    let payload = gateway.last_order_payload().await.unwrap();
    assert_eq!(payload["callback_url"], "https://site/payment-callback");
    assert_eq!(payload["notification_id"], notification_id);
    assert_eq!(payload["ipn_notification_type"], "POST");
    // Caller fields otherwise pass through untouched
    assert_eq!(payload["amount"], 5000);
    assert_eq!(payload["currency"], "UGX");
    assert!(payload.get("order_id").is_none());
}

#[tokio::test]
async fn test_submit_order_surfaces_upstream_401() {
    let behavior = MockGatewayBehavior {
        order_status: 401,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/payments/orders")
        .json(&fixtures::order_body())
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "payment processing failed");
    assert!(body["message"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn test_submit_order_fails_when_token_unavailable() {
    let behavior = MockGatewayBehavior {
        token: None,
        token_status: 500,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/payments/orders")
        .json(&fixtures::order_body())
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "payment processing failed");

    // No order submission was attempted upstream
    assert!(gateway.state.order_requests.lock().await.is_empty());
}

#[tokio::test]
async fn test_submit_order_missing_order_id_is_rejected() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let mut body = fixtures::order_body();
    body.as_object_mut().unwrap().remove("order_id");

    let res = warp::test::request()
        .method("POST")
        .path("/payments/orders")
        .json(&body)
        .reply(&routes)
        .await;

    // Deserialization of the body fails before the handler runs
    assert_eq!(res.status(), warp::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_first_delivery_acknowledged() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/webhook")
        .json(&fixtures::webhook_payload("T1"))
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("T1"));
}

#[tokio::test]
async fn test_webhook_repeated_delivery_is_idempotent() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    for _ in 0..2 {
        let res = warp::test::request()
            .method("POST")
            .path("/webhook")
            .json(&fixtures::webhook_payload("T1"))
            .reply(&routes)
            .await;

        assert_eq!(res.status(), warp::http::StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["success"], true);
    }
}

#[tokio::test]
async fn test_webhook_missing_tracking_id_rejected() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/webhook")
        .json(&fixtures::malformed_webhook_payload())
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "invalid webhook payload");
}

#[tokio::test]
async fn test_webhook_preflight_answers_open_cors() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("OPTIONS")
        .path("/webhook")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::NO_CONTENT);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        res.headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok()),
        Some("POST, OPTIONS")
    );
}

#[tokio::test]
async fn test_concurrent_webhooks_for_distinct_tracking_ids() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let deliveries = (0..8).map(|i| {
        let routes = routes.clone();
        async move {
            warp::test::request()
                .method("POST")
                .path("/webhook")
                .json(&fixtures::webhook_payload(&format!("T{}", i)))
                .reply(&routes)
                .await
        }
    });

    let responses = futures::future::join_all(deliveries).await;
    for res in responses {
        assert_eq!(res.status(), warp::http::StatusCode::OK);
    }
}

#[tokio::test]
async fn test_health_endpoint_reports_gateway() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["details"]["gateway"].get("available").is_some());
}

#[tokio::test]
async fn test_metrics_endpoint_counts_requests() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    warp::test::request()
        .method("POST")
        .path("/webhook")
        .json(&fixtures::webhook_payload("T1"))
        .reply(&routes)
        .await;

    let res = warp::test::request()
        .method("GET")
        .path("/metrics")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::OK);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["webhooks_accepted"], 1);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let routes = create_test_routes(config_for_gateway(&gateway)).await.unwrap();

    let res = warp::test::request()
        .method("GET")
        .path("/definitely-not-a-route")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), warp::http::StatusCode::NOT_FOUND);
}
