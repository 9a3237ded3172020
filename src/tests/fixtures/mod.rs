//! Test fixtures - Sample payloads shared across suites

use serde_json::{json, Value};

/// A typical order submission body as the storefront sends it
pub fn order_body() -> Value {
    json!({
        "order_id": "order-1",
        "id": "M-55",
        "amount": 5000,
        "currency": "UGX",
        "description": "Two dozen cinnamon rolls",
        "billing_address": {
            "email_address": "customer@example.com",
            "phone_number": "+256700000000",
            "first_name": "Ada",
            "last_name": "Auma"
        }
    })
}

/// An order submission body attempting to override server-injected fields
pub fn adversarial_order_body() -> Value {
    let mut body = order_body();
    body["callback_url"] = json!("http://evil.example");
    body["notification_id"] = json!("attacker-ipn");
    body["ipn_notification_type"] = json!("GET");
    body
}

/// A webhook payload as the gateway delivers it
pub fn webhook_payload(tracking_id: &str) -> Value {
    json!({
        "OrderTrackingId": tracking_id,
        "OrderMerchantReference": "M-55",
        "OrderNotificationType": "IPNCHANGE"
    })
}

/// A webhook payload missing the required tracking id
pub fn malformed_webhook_payload() -> Value {
    json!({
        "OrderMerchantReference": "M-55",
        "OrderNotificationType": "IPNCHANGE"
    })
}
