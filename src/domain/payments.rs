//! Payments domain models and types

use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Short-lived bearer token issued by the gateway token endpoint.
///
/// Owned transiently by the submission flow; never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Bearer secret, keep it out of logs
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// Payment status of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Reversed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Reversed => "reversed",
        }
    }

    /// Map the gateway's transaction-status description to a local status
    pub fn from_gateway_description(description: &str) -> Option<Self> {
        match description.to_lowercase().as_str() {
            "completed" => Some(PaymentStatus::Completed),
            "failed" | "invalid" => Some(PaymentStatus::Failed),
            "pending" => Some(PaymentStatus::Pending),
            "reversed" => Some(PaymentStatus::Reversed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment transaction persisted in the store, keyed by the
/// gateway-assigned tracking id.
///
/// `order_id` is `None` while the transaction is unlinked: the first
/// webhook for a tracking id the submission flow never recorded creates
/// the row without a linkage, and only the submission flow establishes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub tracking_id: String,
    pub merchant_reference: String,
    pub order_id: Option<String>,
    /// Raw last-seen webhook payload, retained for audit
    pub callback_data: Option<Value>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PaymentTransaction {
    pub fn is_linked(&self) -> bool {
        self.order_id.is_some()
    }
}

/// Order payment-status record.
///
/// Order placement is owned elsewhere; this subsystem only mutates
/// `payment_status` and `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Order submission request assembled from caller input.
///
/// `order_id` identifies the local order for the post-success linking hook
/// and is never forwarded to the gateway; `fields` pass through verbatim,
/// except for the server-injected callback/IPN keys.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub order_id: String,
    pub fields: Map<String, Value>,
}

impl OrderSubmission {
    pub fn new(order_id: String, fields: Map<String, Value>) -> Self {
        Self { order_id, fields }
    }

    /// Validate the submission against business rules
    pub fn validate(&self) -> AppResult<()> {
        if self.order_id.trim().is_empty() {
            return Err(AppError::Validation("order_id cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Webhook notification delivered by the gateway
#[derive(Debug, Clone)]
pub struct WebhookNotification {
    pub tracking_id: String,
    pub merchant_reference: String,
    pub notification_type: String,
    /// Full payload as delivered, for audit storage
    pub raw: Value,
}

impl WebhookNotification {
    /// Validate the notification before any persistence is attempted
    pub fn validate(&self) -> AppResult<()> {
        if self.tracking_id.trim().is_empty() {
            return Err(AppError::MalformedWebhook(
                "OrderTrackingId is missing or empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Policy for resolving an order's payment status from a webhook
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationPolicy {
    /// Treat webhook arrival as proof of completion
    TrustWebhook,
    /// Query the gateway for the authoritative transaction status
    VerifyWithGateway,
}

impl ReconciliationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationPolicy::TrustWebhook => "trust_webhook",
            ReconciliationPolicy::VerifyWithGateway => "verify_with_gateway",
        }
    }
}

impl std::str::FromStr for ReconciliationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trust_webhook" => Ok(ReconciliationPolicy::TrustWebhook),
            "verify_with_gateway" => Ok(ReconciliationPolicy::VerifyWithGateway),
            _ => Err(format!("unsupported reconciliation policy: {}", s)),
        }
    }
}

/// Client information for request tracking
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP address
    pub ip_address: String,

    /// User agent
    pub user_agent: Option<String>,

    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
