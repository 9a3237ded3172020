//! HTTP models - Infrastructure concerns
//!
//! This module contains models that are specific to infrastructure concerns
//! like HTTP requests/responses, serialization, and external interfaces.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Order submission request body (infrastructure concern)
///
/// `order_id` names the local order for post-success transaction linking;
/// every other field passes through to the gateway verbatim, subject to the
/// server-side callback/IPN overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderBody {
    /// Local order identifier, not forwarded to the gateway
    pub order_id: String,

    /// Caller-supplied order fields (amount, currency, description, billing, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Webhook payload as delivered by the gateway (bit-exact wire contract)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "OrderTrackingId", default)]
    pub order_tracking_id: Option<String>,

    #[serde(rename = "OrderMerchantReference", default)]
    pub order_merchant_reference: Option<String>,

    #[serde(rename = "OrderNotificationType", default)]
    pub order_notification_type: Option<String>,

    /// Any additional fields the gateway includes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Webhook acknowledgment body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}

impl WebhookAck {
    pub fn accepted(tracking_id: &str) -> Self {
        Self {
            success: true,
            message: format!("notification received for {}", tracking_id),
        }
    }
}

/// Structured error body returned at the HTTP boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// HTTP request context for tracking and logging (infrastructure concern)
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,

    /// Client IP address
    pub client_ip: String,

    /// User agent
    pub user_agent: Option<String>,

    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Operation label for logging
    pub operation: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(client_ip: String, operation: String) -> Self {
        Self {
            request_id: generate_request_id(),
            client_ip,
            user_agent: None,
            timestamp: chrono::Utc::now(),
            operation,
        }
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }
}

fn generate_request_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("req_{:x}", now)
}
