//! Unit tests for the gateway client and application services,
//! exercised against the in-process mock gateway

use std::sync::Arc;

use crate::application::services::{OrdersService, WebhooksService};
use crate::domain::payments::{
    ClientInfo, OrderRecord, OrderSubmission, PaymentStatus, PaymentTransaction,
    ReconciliationPolicy,
};
use crate::infrastructure::adapters::{
    OrdersStore, PesapalGatewayClient, TransactionsStore,
};
use crate::shared::error::AppError;
use crate::tests::common::{config_for_gateway, spawn_mock_gateway, MockGatewayBehavior};
use serde_json::json;
use tokio_test::assert_ok;

fn client_info() -> ClientInfo {
    ClientInfo {
        ip_address: "127.0.0.1".to_string(),
        user_agent: Some("test-suite".to_string()),
        timestamp: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_request_access_token_resolves_token() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let token = client.request_access_token().await.unwrap();
    assert_eq!(token.as_str(), "abc123");

    // Credentials travel in the request body
    let captured = gateway.state.token_requests.lock().await;
    assert_eq!(captured.len(), 1);
    assert!(captured[0].get("consumer_key").is_some());
    assert!(captured[0].get("consumer_secret").is_some());
}

#[tokio::test]
async fn test_request_access_token_missing_token_field_fails() {
    let behavior = MockGatewayBehavior {
        token: None,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let err = client.request_access_token().await.unwrap_err();
    match err {
        AppError::Authentication { status, detail } => {
            assert_eq!(status, Some(200));
            assert!(detail.contains("invalid_consumer_key_or_secret"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_request_access_token_upstream_error_carries_status() {
    let behavior = MockGatewayBehavior {
        token: None,
        token_status: 503,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let err = client.request_access_token().await.unwrap_err();
    match err {
        AppError::Authentication { status, .. } => assert_eq!(status, Some(503)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_order_request_passes_body_through() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let token = client.request_access_token().await.unwrap();
    let response = client
        .submit_order_request(&token, &json!({"id": "M-55", "amount": 5000}))
        .await
        .unwrap();

    // Gateway body comes back verbatim, including fields this server ignores
    assert_eq!(response["order_tracking_id"], "T-100");
    assert_eq!(response["merchant_reference"], "M-55");
    assert_eq!(response["redirect_url"], "https://pay.pesapal.com/iframe");

    // Bearer token travels in the Authorization header
    let captured = gateway.state.order_requests.lock().await;
    assert_eq!(
        captured[0].0.as_deref(),
        Some("Bearer abc123")
    );
}

#[tokio::test]
async fn test_submit_order_request_upstream_401() {
    let behavior = MockGatewayBehavior {
        order_status: 401,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let token = client.request_access_token().await.unwrap();
    let err = client
        .submit_order_request(&token, &json!({"amount": 1}))
        .await
        .unwrap_err();

    match err {
        AppError::GatewaySubmission { status, detail } => {
            assert_eq!(status, 401);
            assert!(detail.contains("order rejected by gateway"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_order_request_times_out() {
    let behavior = MockGatewayBehavior {
        order_delay_ms: 2_000,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;

    let mut config = config_for_gateway(&gateway);
    config.pesapal.submit_timeout_seconds = 1;
    let client = PesapalGatewayClient::new(Arc::new(config)).unwrap();

    let token = client.request_access_token().await.unwrap();
    let err = client
        .submit_order_request(&token, &json!({"amount": 1}))
        .await
        .unwrap_err();

    match err {
        AppError::GatewaySubmission { status, detail } => {
            assert_eq!(status, 500);
            assert!(detail.contains("timed out"), "detail was: {}", detail);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_transaction_status_query() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let client =
        PesapalGatewayClient::new(Arc::new(config_for_gateway(&gateway))).unwrap();

    let token = client.request_access_token().await.unwrap();
    let status = tokio_test::assert_ok!(client.get_transaction_status(&token, "T-100").await);

    assert_eq!(status["payment_status_description"], "Completed");
    assert_eq!(
        gateway.state.status_queries.lock().await.as_slice(),
        &["T-100".to_string()]
    );
}

#[tokio::test]
async fn test_orders_service_merges_and_links() {
    let gateway = spawn_mock_gateway(MockGatewayBehavior::default()).await;
    let config = Arc::new(config_for_gateway(&gateway));
    let client = Arc::new(PesapalGatewayClient::new(config.clone()).unwrap());
    let transactions = Arc::new(TransactionsStore::new(None, 48));
    let service = OrdersService::new(config.clone(), client, transactions.clone());

    let fields = crate::tests::fixtures::adversarial_order_body();
    let mut fields = fields.as_object().unwrap().clone();
    fields.remove("order_id");
    let submission = OrderSubmission::new("order-1".to_string(), fields);

    let response = service.submit_order(submission, &client_info()).await.unwrap();
    assert_eq!(response["order_tracking_id"], "T-100");

    // Outbound payload carries the configured values, not the caller's
    let payload = gateway.last_order_payload().await.unwrap();
    assert_eq!(payload["callback_url"], "https://site/payment-callback");
    assert_eq!(payload["notification_id"], config.pesapal.notification_id);
    assert_eq!(payload["ipn_notification_type"], "POST");
    assert_eq!(payload["amount"], 5000);
    // The local order id never reaches the gateway
    assert!(payload.get("order_id").is_none());

    // Post-success hook linked the tracking id to the local order
    let stored = transactions.get("T-100").await.unwrap().unwrap();
    assert_eq!(stored.order_id.as_deref(), Some("order-1"));
    assert_eq!(stored.merchant_reference, "M-55");
}

#[tokio::test]
async fn test_orders_service_aborts_on_authentication_failure() {
    let behavior = MockGatewayBehavior {
        token: None,
        token_status: 500,
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let config = Arc::new(config_for_gateway(&gateway));
    let client = Arc::new(PesapalGatewayClient::new(config.clone()).unwrap());
    let transactions = Arc::new(TransactionsStore::new(None, 48));
    let service = OrdersService::new(config, client, transactions);

    let submission = OrderSubmission::new(
        "order-1".to_string(),
        json!({"amount": 1}).as_object().unwrap().clone(),
    );
    let err = service.submit_order(submission, &client_info()).await.unwrap_err();
    assert!(matches!(err, AppError::Authentication { .. }));

    // The order endpoint was never reached
    assert!(gateway.state.order_requests.lock().await.is_empty());
}

#[tokio::test]
async fn test_webhooks_service_verify_policy_queries_gateway() {
    let behavior = MockGatewayBehavior {
        transaction_status: "Failed".to_string(),
        ..Default::default()
    };
    let gateway = spawn_mock_gateway(behavior).await;
    let config = Arc::new(config_for_gateway(&gateway));
    let client = Arc::new(PesapalGatewayClient::new(config).unwrap());
    let transactions = Arc::new(TransactionsStore::new(None, 48));
    let orders = Arc::new(OrdersStore::new(None));

    orders
        .put(&OrderRecord {
            order_id: "order-1".to_string(),
            payment_status: PaymentStatus::Pending,
            updated_at: chrono::Utc::now(),
        })
        .await
        .unwrap();
    transactions
        .upsert(&PaymentTransaction {
            tracking_id: "T-100".to_string(),
            merchant_reference: "M-55".to_string(),
            order_id: Some("order-1".to_string()),
            callback_data: None,
            updated_at: chrono::Utc::now(),
        })
        .await
        .unwrap();

    let service = WebhooksService::new(
        ReconciliationPolicy::VerifyWithGateway,
        client,
        transactions,
        orders.clone(),
    );

    let notification = crate::infrastructure::converters::ModelConverter::to_domain_notification(
        &serde_json::from_value(crate::tests::fixtures::webhook_payload("T-100")).unwrap(),
    );
    let ack = service.handle_notification(notification).await.unwrap();
    assert!(ack.success);

    // The authoritative status came from the gateway, not the webhook
    assert_eq!(
        gateway.state.status_queries.lock().await.as_slice(),
        &["T-100".to_string()]
    );
    let order = orders.get("order-1").await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Failed);
}
