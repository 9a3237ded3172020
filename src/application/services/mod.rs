//! Application services - Orchestration of domain logic

pub mod metrics_service;
pub mod orders_service;
pub mod webhooks_service;

pub use metrics_service::MetricsService;
pub use orders_service::OrdersService;
pub use webhooks_service::WebhooksService;
