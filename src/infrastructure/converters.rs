//! Converters between domain and infrastructure models

use crate::{
    domain::payments::{ClientInfo, OrderSubmission, WebhookNotification},
    infrastructure::http::models::{RequestContext, SubmitOrderBody, WebhookPayload},
    shared::error::AppResult,
};
use serde_json::Value;

/// Converter for transforming between domain and infrastructure models
pub struct ModelConverter;

impl ModelConverter {
    /// Convert an order submission body to a domain submission
    pub fn to_domain_submission(body: &SubmitOrderBody) -> AppResult<OrderSubmission> {
        let submission = OrderSubmission::new(body.order_id.clone(), body.fields.clone());
        submission.validate()?;
        Ok(submission)
    }

    /// Convert a webhook payload to a domain notification.
    ///
    /// Missing wire fields become empty strings; validation of the required
    /// tracking id happens on the domain type, before any persistence.
    pub fn to_domain_notification(payload: &WebhookPayload) -> WebhookNotification {
        let raw = serde_json::to_value(payload).unwrap_or(Value::Null);

        WebhookNotification {
            tracking_id: payload.order_tracking_id.clone().unwrap_or_default(),
            merchant_reference: payload.order_merchant_reference.clone().unwrap_or_default(),
            notification_type: payload.order_notification_type.clone().unwrap_or_default(),
            raw,
        }
    }

    /// Create client info from request context
    pub fn to_client_info(context: &RequestContext) -> ClientInfo {
        ClientInfo {
            ip_address: context.client_ip.clone(),
            user_agent: context.user_agent.clone(),
            timestamp: context.timestamp,
        }
    }
}
