//! HTTP server implementation for reverse proxy deployment
//!
//! This module contains the HTTP server implementation optimized for deployment
//! behind a reverse proxy (nginx, Caddy, etc.) that handles SSL and compression.

use crate::{
    application::{
        services::{MetricsService, OrdersService, WebhooksService},
        use_cases::{
            GetMetricsUseCase, HealthCheckUseCase, ProcessWebhookUseCase, SubmitOrderUseCase,
        },
    },
    config::AppConfig,
    domain::payments::ReconciliationPolicy,
    infrastructure::adapters::{
        MonitoringAdapter, OrdersStore, PesapalGatewayClient, TransactionsStore,
    },
    infrastructure::http::routes::RouteBuilder,
    middleware::{cors::CorsMiddleware, rate_limit::RateLimitMiddleware},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use warp::{Filter, Reply};

/// HTTP server implementation optimized for reverse proxy deployment
pub struct HttpServer {
    config: AppConfig,
    submit_order_use_case: Arc<SubmitOrderUseCase>,
    webhook_use_case: Arc<ProcessWebhookUseCase>,
    metrics_use_case: Arc<GetMetricsUseCase>,
    health_use_case: Arc<HealthCheckUseCase>,
    gateway: Arc<PesapalGatewayClient>,
    monitoring: Arc<MonitoringAdapter>,
    rate_limit_middleware: Arc<RateLimitMiddleware>,
}

impl HttpServer {
    /// Create a new HTTP server instance
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let config_arc = Arc::new(config.clone());

        // Validate CORS configuration up front
        CorsMiddleware::new(config.clone())
            .validate_config()
            .map_err(AppError::Config)?;

        let policy: ReconciliationPolicy = config
            .reconciliation
            .policy
            .parse()
            .map_err(AppError::Config)?;

        // Initialize infrastructure layer
        let redis = Self::connect_store(&config).await;
        let gateway = Arc::new(PesapalGatewayClient::new(config_arc.clone())?);
        let transactions = Arc::new(TransactionsStore::new(
            redis.clone(),
            config.store.retention_hours,
        ));
        let orders = Arc::new(OrdersStore::new(redis));
        let monitoring = Arc::new(MonitoringAdapter::new());

        // Initialize application layer
        let metrics_service = Arc::new(MetricsService::new());
        let orders_service = Arc::new(OrdersService::new(
            config_arc.clone(),
            gateway.clone(),
            transactions.clone(),
        ));
        let webhooks_service = Arc::new(WebhooksService::new(
            policy,
            gateway.clone(),
            transactions,
            orders,
        ));

        // Initialize use cases
        let submit_order_use_case = Arc::new(SubmitOrderUseCase::new(
            orders_service,
            metrics_service.clone(),
            monitoring.clone(),
        ));
        let webhook_use_case = Arc::new(ProcessWebhookUseCase::new(
            webhooks_service,
            metrics_service.clone(),
            monitoring.clone(),
        ));
        let metrics_use_case = Arc::new(GetMetricsUseCase::new(metrics_service));
        let health_use_case = Arc::new(HealthCheckUseCase);

        // Initialize rate limiting middleware
        let rate_limit_middleware = Arc::new(RateLimitMiddleware::new(config.clone()));

        Ok(Self {
            config,
            submit_order_use_case,
            webhook_use_case,
            metrics_use_case,
            health_use_case,
            gateway,
            monitoring,
            rate_limit_middleware,
        })
    }

    /// Connect the optional Redis backing store.
    ///
    /// Falls back to the in-memory mirror when disabled or unreachable.
    async fn connect_store(config: &AppConfig) -> Option<Arc<redis::aio::ConnectionManager>> {
        if !config.store.enabled {
            return None;
        }

        let client = match redis::Client::open(config.store.redis_url.as_str()) {
            Ok(client) => client,
            Err(e) => {
                warn!("Invalid Redis URL, falling back to in-memory store: {}", e);
                return None;
            }
        };

        match redis::aio::ConnectionManager::new(client).await {
            Ok(manager) => {
                info!("Connected Redis transaction store");
                Some(Arc::new(manager))
            }
            Err(e) => {
                warn!("Redis unavailable, falling back to in-memory store: {}", e);
                None
            }
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the HTTP server
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.server_address();
        info!("Starting HTTP server on {}", addr);
        info!("SSL/TLS and compression should be handled by the reverse proxy");

        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let routes = self.create_routes();

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    fn create_routes(self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        RouteBuilder::build_routes(
            self.config,
            self.submit_order_use_case,
            self.webhook_use_case,
            self.metrics_use_case,
            self.health_use_case,
            self.gateway,
            self.monitoring,
            self.rate_limit_middleware,
        )
    }
}

#[cfg(test)]
/// Create test routes for integration testing
pub async fn create_test_routes(
    config: AppConfig,
) -> Result<impl Filter<Extract = impl Reply> + Clone, Box<dyn std::error::Error + Send + Sync>> {
    let server = HttpServer::new(config).await?;
    Ok(server.create_routes())
}
