//! HTTP route handlers module
//!
//! This module contains separate route handlers for different endpoint types,
//! organized by functionality to improve maintainability and testability.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod webhooks;

pub use health::handle_health_request;
pub use metrics::{handle_metrics_request, handle_prometheus_request};
pub use orders::handle_submit_order;
pub use webhooks::{handle_webhook, handle_webhook_preflight};
