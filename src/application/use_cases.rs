//! Use cases - Application business operations

use crate::{
    application::services::*,
    domain::payments::{ClientInfo, OrderSubmission, WebhookNotification},
    infrastructure::adapters::MonitoringAdapter,
    infrastructure::http::models::WebhookAck,
    shared::error::AppResult,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Use case for submitting payment orders to the gateway
pub struct SubmitOrderUseCase {
    orders_service: Arc<OrdersService>,
    metrics_service: Arc<MetricsService>,
    monitoring: Arc<MonitoringAdapter>,
}

impl SubmitOrderUseCase {
    /// Create a new use case
    pub fn new(
        orders_service: Arc<OrdersService>,
        metrics_service: Arc<MetricsService>,
        monitoring: Arc<MonitoringAdapter>,
    ) -> Self {
        Self {
            orders_service,
            metrics_service,
            monitoring,
        }
    }

    /// Execute order submission
    pub async fn execute(
        &self,
        submission: OrderSubmission,
        client_info: &ClientInfo,
    ) -> AppResult<Value> {
        let started = Instant::now();
        let result = self.orders_service.submit_order(submission, client_info).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.metrics_service.record_response_time(elapsed_ms);

        match &result {
            Ok(_) => {
                self.metrics_service.record_request(true);
                self.metrics_service.record_order_submitted();
                self.monitoring.record_order_submission(elapsed_ms as f64);
                info!("Order submission processed successfully");
            }
            Err(e) => {
                self.metrics_service.record_request(false);
                warn!("Order submission failed: {}", e);
            }
        }

        result
    }
}

/// Use case for processing gateway webhook notifications
pub struct ProcessWebhookUseCase {
    webhooks_service: Arc<WebhooksService>,
    metrics_service: Arc<MetricsService>,
    monitoring: Arc<MonitoringAdapter>,
}

impl ProcessWebhookUseCase {
    /// Create a new use case
    pub fn new(
        webhooks_service: Arc<WebhooksService>,
        metrics_service: Arc<MetricsService>,
        monitoring: Arc<MonitoringAdapter>,
    ) -> Self {
        Self {
            webhooks_service,
            metrics_service,
            monitoring,
        }
    }

    /// Execute webhook processing
    pub async fn execute(&self, notification: WebhookNotification) -> AppResult<WebhookAck> {
        self.monitoring.record_webhook();

        let result = self.webhooks_service.handle_notification(notification).await;

        match &result {
            Ok(_) => {
                self.metrics_service.record_request(true);
                self.metrics_service.record_webhook(true);
            }
            Err(e) => {
                self.metrics_service.record_request(false);
                self.metrics_service.record_webhook(false);
                warn!("Webhook processing failed: {}", e);
            }
        }

        result
    }
}

/// Use case for getting application metrics
pub struct GetMetricsUseCase {
    metrics_service: Arc<MetricsService>,
}

impl GetMetricsUseCase {
    /// Create a new use case
    pub fn new(metrics_service: Arc<MetricsService>) -> Self {
        Self { metrics_service }
    }

    /// Execute the use case
    pub fn execute(&self) -> Value {
        self.metrics_service.get_metrics()
    }
}

/// Use case for health checks
pub struct HealthCheckUseCase;

impl HealthCheckUseCase {
    /// Execute the use case with gateway connectivity status
    pub async fn execute(
        &self,
        gateway: Option<Arc<crate::infrastructure::adapters::PesapalGatewayClient>>,
    ) -> AppResult<crate::domain::health::HealthResponse> {
        use crate::domain::health::*;
        use serde_json::json;

        let mut status = HealthStatus::Healthy;
        let mut details = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": self.get_uptime(),
        });

        // Check gateway connectivity if the client is available
        if let Some(client) = gateway {
            let gateway_available = client.is_available().await;

            details["gateway"] = json!({
                "available": gateway_available,
                "status": if gateway_available { "connected" } else { "disconnected" }
            });

            if !gateway_available {
                status = HealthStatus::Degraded;
                details["warnings"] = json!([
                    "Payment gateway is currently unreachable",
                    "Order submissions may fail or be delayed"
                ]);
            }
        } else {
            details["gateway"] = json!({
                "available": false,
                "status": "no_client",
                "note": "Gateway client not available for health check"
            });
            status = HealthStatus::Degraded;
        }

        Ok(HealthResponse { status, details })
    }

    /// Get system uptime
    fn get_uptime(&self) -> String {
        if let Ok(uptime) = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
        {
            let days = uptime.as_secs() / 86400;
            let hours = (uptime.as_secs() % 86400) / 3600;
            let minutes = (uptime.as_secs() % 3600) / 60;
            format!("{}d {}h {}m", days, hours, minutes)
        } else {
            "unknown".to_string()
        }
    }
}
