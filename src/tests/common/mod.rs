//! Common test utilities
//!
//! Provides an in-process mock PesaPal gateway bound to an ephemeral port,
//! capturing every outbound request for later assertions.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;
use warp::{Filter, Reply};

use crate::config::AppConfig;

/// Behavior knobs for the mock gateway
#[derive(Debug, Clone)]
pub struct MockGatewayBehavior {
    /// Token returned by the token endpoint; None omits the `token` field
    pub token: Option<String>,
    /// HTTP status of the token endpoint
    pub token_status: u16,
    /// HTTP status of the order-submission endpoint
    pub order_status: u16,
    /// Tracking id returned on successful order submission
    pub order_tracking_id: String,
    /// Artificial delay before answering order submissions
    pub order_delay_ms: u64,
    /// `payment_status_description` returned by the status query
    pub transaction_status: String,
}

impl Default for MockGatewayBehavior {
    fn default() -> Self {
        Self {
            token: Some("abc123".to_string()),
            token_status: 200,
            order_status: 200,
            order_tracking_id: "T-100".to_string(),
            order_delay_ms: 0,
            transaction_status: "Completed".to_string(),
        }
    }
}

/// Requests captured by the mock gateway
#[derive(Default)]
pub struct MockGatewayState {
    pub token_requests: Mutex<Vec<Value>>,
    /// (authorization header, payload) pairs
    pub order_requests: Mutex<Vec<(Option<String>, Value)>>,
    pub status_queries: Mutex<Vec<String>>,
}

/// Handle to a running mock gateway
pub struct MockGateway {
    pub addr: SocketAddr,
    pub state: Arc<MockGatewayState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockGateway {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Last captured order-submission payload
    pub async fn last_order_payload(&self) -> Option<Value> {
        self.state
            .order_requests
            .lock()
            .await
            .last()
            .map(|(_, payload)| payload.clone())
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawn a mock gateway with the given behavior
pub async fn spawn_mock_gateway(behavior: MockGatewayBehavior) -> MockGateway {
    let state = Arc::new(MockGatewayState::default());
    let behavior = Arc::new(behavior);

    let token_state = state.clone();
    let token_behavior = behavior.clone();
    let token_route = warp::path!("api" / "Auth" / "RequestToken")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |body: Value| {
            let state = token_state.clone();
            let behavior = token_behavior.clone();
            async move {
                state.token_requests.lock().await.push(body);

                let body = match &behavior.token {
                    Some(token) => json!({
                        "token": token,
                        "expiryDate": "2026-01-01T00:05:00Z",
                        "status": "200"
                    }),
                    None => json!({
                        "error": "invalid_consumer_key_or_secret",
                        "status": "500"
                    }),
                };

                let status = warp::http::StatusCode::from_u16(behavior.token_status)
                    .unwrap_or(warp::http::StatusCode::OK);
                Ok::<_, warp::Rejection>(
                    warp::reply::with_status(warp::reply::json(&body), status).into_response(),
                )
            }
        });

    let order_state = state.clone();
    let order_behavior = behavior.clone();
    let order_route = warp::path!("api" / "Transactions" / "SubmitOrderRequest")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::json())
        .and_then(move |auth: Option<String>, body: Value| {
            let state = order_state.clone();
            let behavior = order_behavior.clone();
            async move {
                state.order_requests.lock().await.push((auth, body.clone()));

                if behavior.order_delay_ms > 0 {
                    tokio::time::sleep(std::time::Duration::from_millis(behavior.order_delay_ms))
                        .await;
                }

                let (status, response) = if behavior.order_status < 300 {
                    (
                        warp::http::StatusCode::OK,
                        json!({
                            "order_tracking_id": behavior.order_tracking_id,
                            "merchant_reference": body.get("id").cloned().unwrap_or(Value::Null),
                            "redirect_url": "https://pay.pesapal.com/iframe",
                            "status": "200"
                        }),
                    )
                } else {
                    (
                        warp::http::StatusCode::from_u16(behavior.order_status)
                            .unwrap_or(warp::http::StatusCode::INTERNAL_SERVER_ERROR),
                        json!({
                            "error": {
                                "code": behavior.order_status,
                                "message": "order rejected by gateway"
                            },
                            "status": behavior.order_status.to_string()
                        }),
                    )
                };

                Ok::<_, warp::Rejection>(
                    warp::reply::with_status(warp::reply::json(&response), status).into_response(),
                )
            }
        });

    let status_state = state.clone();
    let status_behavior = behavior.clone();
    let status_route = warp::path!("api" / "Transactions" / "GetTransactionStatus")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and_then(move |query: HashMap<String, String>| {
            let state = status_state.clone();
            let behavior = status_behavior.clone();
            async move {
                let tracking_id = query.get("orderTrackingId").cloned().unwrap_or_default();
                state.status_queries.lock().await.push(tracking_id.clone());

                Ok::<_, warp::Rejection>(warp::reply::json(&json!({
                    "payment_status_description": behavior.transaction_status,
                    "order_tracking_id": tracking_id,
                    "status_code": 1
                })))
            }
        });

    let routes = token_route.or(order_route).or(status_route);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("failed to bind mock gateway");
    let addr = listener.local_addr().expect("failed to read mock gateway addr");
    let server = warp::serve(routes)
        .incoming(listener)
        .graceful(async {
            rx.await.ok();
        })
        .run();
    tokio::spawn(server);

    MockGateway {
        addr,
        state,
        shutdown: Some(tx),
    }
}

/// Test configuration pointed at a running mock gateway
pub fn config_for_gateway(gateway: &MockGateway) -> AppConfig {
    let mut config = crate::tests::config::test_config();
    config.pesapal.base_url = gateway.base_url();
    config
}
