//! Order submission service orchestrating token acquisition, payload merging,
//! gateway submission, and post-success transaction linking

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::payments::{ClientInfo, OrderSubmission, PaymentTransaction};
use crate::infrastructure::adapters::{PesapalGatewayClient, TransactionsStore};
use crate::shared::error::AppResult;
use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct OrdersService {
    config: Arc<AppConfig>,
    gateway: Arc<PesapalGatewayClient>,
    transactions: Arc<TransactionsStore>,
}

impl OrdersService {
    pub fn new(
        config: Arc<AppConfig>,
        gateway: Arc<PesapalGatewayClient>,
        transactions: Arc<TransactionsStore>,
    ) -> Self {
        Self {
            config,
            gateway,
            transactions,
        }
    }

    /// Submit an order to the gateway.
    ///
    /// Acquires a fresh token, merges the caller fields with the server-side
    /// callback/IPN configuration, posts to the gateway, and returns the
    /// gateway response body verbatim. On success the resulting tracking id
    /// is linked to the caller's order id in the transaction store.
    pub async fn submit_order(
        &self,
        submission: OrderSubmission,
        client_info: &ClientInfo,
    ) -> AppResult<Value> {
        submission.validate()?;

        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            order_id = %submission.order_id,
            client_ip = %client_info.ip_address,
            "Submitting order to payment gateway"
        );

        // Fresh token per submission; an authentication failure aborts here
        let token = self.gateway.request_access_token().await?;

        let payload = self.merge_payload(&submission);
        let response = self.gateway.submit_order_request(&token, &payload).await?;

        self.record_submission(&submission, &response).await;

        Ok(response)
    }

    /// Merge caller fields with the server-injected callback/IPN keys.
    ///
    /// The injected keys always override caller-supplied values of the same
    /// name: the caller cannot redirect callbacks to an arbitrary URL.
    fn merge_payload(&self, submission: &OrderSubmission) -> Value {
        let mut merged = submission.fields.clone();
        merged.insert(
            "callback_url".to_string(),
            Value::String(self.config.callback_url().to_string()),
        );
        merged.insert(
            "notification_id".to_string(),
            Value::String(self.config.pesapal.notification_id.clone()),
        );
        merged.insert(
            "ipn_notification_type".to_string(),
            Value::String("POST".to_string()),
        );
        Value::Object(merged)
    }

    /// Post-success hook: link the gateway-assigned tracking id to the
    /// caller's order id.
    ///
    /// The gateway already accepted the order, so a bookkeeping failure here
    /// is logged and not surfaced to the caller.
    async fn record_submission(&self, submission: &OrderSubmission, response: &Value) {
        let tracking_id = match response.get("order_tracking_id").and_then(|v| v.as_str()) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                warn!(
                    order_id = %submission.order_id,
                    "Gateway response carried no order_tracking_id; transaction left unrecorded"
                );
                return;
            }
        };

        let merchant_reference = response
            .get("merchant_reference")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| {
                submission
                    .fields
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| submission.order_id.clone());

        // Preserve audit data if a webhook somehow arrived first
        let callback_data = match self.transactions.get(&tracking_id).await {
            Ok(existing) => existing.and_then(|t| t.callback_data),
            Err(_) => None,
        };

        let transaction = PaymentTransaction {
            tracking_id: tracking_id.clone(),
            merchant_reference,
            order_id: Some(submission.order_id.clone()),
            callback_data,
            updated_at: Utc::now(),
        };

        if let Err(e) = self.transactions.upsert(&transaction).await {
            error!(
                tracking_id = %tracking_id,
                order_id = %submission.order_id,
                error = %e,
                "Failed to record transaction linkage after successful submission"
            );
        }
    }
}
