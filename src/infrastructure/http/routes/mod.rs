//! HTTP routes module
//!
//! This module contains all HTTP route configurations and handlers.

pub mod builder;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod webhooks;

// Re-export commonly used types
pub use builder::RouteBuilder;
pub use health::HealthRoutes;
pub use metrics::MetricsRoutes;
pub use orders::OrdersRoutes;
pub use webhooks::WebhookRoutes;
