//! Domain layer - Core business logic and domain models
//!
//! This module contains the core business logic, domain models, and business rules
//! that are independent of infrastructure concerns like HTTP, databases, etc.

pub mod health;
pub mod payments;

pub use health::{HealthResponse, HealthStatus};
pub use payments::{
    AccessToken, ClientInfo, OrderRecord, OrderSubmission, PaymentStatus,
    PaymentTransaction, ReconciliationPolicy, WebhookNotification,
};
