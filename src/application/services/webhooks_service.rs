//! Webhook reconciliation service
//!
//! Correlates asynchronous gateway IPN deliveries with locally tracked
//! transactions and updates linked order payment status.

use std::sync::Arc;

use crate::domain::payments::{
    PaymentStatus, PaymentTransaction, ReconciliationPolicy, WebhookNotification,
};
use crate::infrastructure::adapters::{OrdersStore, PesapalGatewayClient, TransactionsStore};
use crate::infrastructure::http::models::WebhookAck;
use crate::shared::error::AppResult;
use chrono::Utc;
use tracing::{info, warn};

pub struct WebhooksService {
    policy: ReconciliationPolicy,
    gateway: Arc<PesapalGatewayClient>,
    transactions: Arc<TransactionsStore>,
    orders: Arc<OrdersStore>,
}

impl WebhooksService {
    pub fn new(
        policy: ReconciliationPolicy,
        gateway: Arc<PesapalGatewayClient>,
        transactions: Arc<TransactionsStore>,
        orders: Arc<OrdersStore>,
    ) -> Self {
        Self {
            policy,
            gateway,
            transactions,
            orders,
        }
    }

    /// Handle a gateway webhook notification.
    ///
    /// The upsert is keyed by tracking id and idempotent; a delivery for an
    /// unknown tracking id creates an unlinked record. The order-status
    /// update only runs when a prior record carried a known order id, and
    /// its failure is logged, never surfaced: the gateway cares only that
    /// the notification was received.
    pub async fn handle_notification(
        &self,
        notification: WebhookNotification,
    ) -> AppResult<WebhookAck> {
        // Reject before any store access
        notification.validate()?;

        info!(
            tracking_id = %notification.tracking_id,
            notification_type = %notification.notification_type,
            "Processing gateway webhook notification"
        );

        // Absence of a prior record is expected for the first delivery
        let existing = self.transactions.get(&notification.tracking_id).await?;

        let transaction = PaymentTransaction {
            tracking_id: notification.tracking_id.clone(),
            merchant_reference: notification.merchant_reference.clone(),
            order_id: existing.as_ref().and_then(|t| t.order_id.clone()),
            callback_data: Some(notification.raw.clone()),
            updated_at: Utc::now(),
        };

        // Upsert failure is fatal to this request; the gateway retries delivery
        self.transactions.upsert(&transaction).await?;

        if let Some(order_id) = existing.and_then(|t| t.order_id) {
            self.update_linked_order(&order_id, &notification).await;
        }

        Ok(WebhookAck::accepted(&notification.tracking_id))
    }

    /// Update the linked order's payment status, swallowing failures.
    async fn update_linked_order(&self, order_id: &str, notification: &WebhookNotification) {
        match self.resolve_status(notification).await {
            Ok(Some(status)) => {
                if let Err(e) = self.orders.update_status(order_id, status.clone()).await {
                    warn!(
                        order_id = %order_id,
                        tracking_id = %notification.tracking_id,
                        error = %e,
                        "Order status update failed; notification still acknowledged"
                    );
                } else {
                    info!(
                        order_id = %order_id,
                        tracking_id = %notification.tracking_id,
                        status = %status,
                        "Order payment status updated"
                    );
                }
            }
            Ok(None) => {
                warn!(
                    order_id = %order_id,
                    tracking_id = %notification.tracking_id,
                    "Gateway reported an unrecognized payment status; order update skipped"
                );
            }
            Err(e) => {
                warn!(
                    order_id = %order_id,
                    tracking_id = %notification.tracking_id,
                    error = %e,
                    "Payment status verification failed; order update skipped"
                );
            }
        }
    }

    /// Resolve the payment status to apply, per the configured policy.
    async fn resolve_status(
        &self,
        notification: &WebhookNotification,
    ) -> AppResult<Option<PaymentStatus>> {
        match self.policy {
            // Original storefront behavior, kept as an explicit policy:
            // webhook arrival is taken as proof of completion
            ReconciliationPolicy::TrustWebhook => Ok(Some(PaymentStatus::Completed)),
            ReconciliationPolicy::VerifyWithGateway => {
                let token = self.gateway.request_access_token().await?;
                let status_body = self
                    .gateway
                    .get_transaction_status(&token, &notification.tracking_id)
                    .await?;

                let description = status_body
                    .get("payment_status_description")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();

                Ok(PaymentStatus::from_gateway_description(description))
            }
        }
    }
}
