//! Monitoring adapter for metrics and observability
//!
//! This adapter handles Prometheus metrics collection for the payment flow.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Adapter for monitoring and metrics services
pub struct MonitoringAdapter {
    prometheus_registry: prometheus::Registry,
    orders_counter: prometheus::Counter,
    webhooks_counter: prometheus::Counter,
    gateway_time_histogram: prometheus::Histogram,
    active_connections_gauge: prometheus::Gauge,
    rate_limited_requests: AtomicU64,
    total_response_time: AtomicU64,
    response_count: AtomicU64,
    active_connections: AtomicU32,
}

impl MonitoringAdapter {
    /// Create a new monitoring adapter
    pub fn new() -> Self {
        let registry = prometheus::Registry::new();

        // Create Prometheus metrics
        let orders_counter = prometheus::Counter::new(
            "payment_orders_submitted_total",
            "Total number of order submissions sent to the gateway"
        ).unwrap();

        let webhooks_counter = prometheus::Counter::new(
            "payment_webhooks_received_total",
            "Total number of gateway webhook notifications received"
        ).unwrap();

        let gateway_time_histogram = prometheus::Histogram::with_opts(
            prometheus::HistogramOpts::new(
                "payment_gateway_request_seconds",
                "Gateway round-trip time in seconds"
            )
        ).unwrap();

        let active_connections_gauge = prometheus::Gauge::new(
            "payment_active_connections",
            "Number of active connections"
        ).unwrap();

        // Register metrics with registry
        registry.register(Box::new(orders_counter.clone())).unwrap();
        registry.register(Box::new(webhooks_counter.clone())).unwrap();
        registry.register(Box::new(gateway_time_histogram.clone())).unwrap();
        registry.register(Box::new(active_connections_gauge.clone())).unwrap();

        Self {
            prometheus_registry: registry,
            orders_counter,
            webhooks_counter,
            gateway_time_histogram,
            active_connections_gauge,
            rate_limited_requests: AtomicU64::new(0),
            total_response_time: AtomicU64::new(0),
            response_count: AtomicU64::new(0),
            active_connections: AtomicU32::new(0),
        }
    }

    /// Record an order submission
    pub fn record_order_submission(&self, response_time_ms: f64) {
        self.orders_counter.inc();
        self.gateway_time_histogram.observe(response_time_ms / 1000.0);

        self.total_response_time.fetch_add(response_time_ms as u64, Ordering::Relaxed);
        self.response_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a webhook delivery
    pub fn record_webhook(&self) {
        self.webhooks_counter.inc();
    }

    /// Get Prometheus metrics in text format
    pub fn get_prometheus_metrics(&self) -> String {
        use prometheus::Encoder;
        let mut buffer = Vec::new();
        let encoder = prometheus::TextEncoder::new();
        encoder.encode(&self.prometheus_registry.gather(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    /// Record rate limited request
    pub fn record_rate_limited_request(&self) {
        self.rate_limited_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment active connections
    pub fn increment_active_connections(&self) {
        self.active_connections.fetch_add(1, Ordering::Relaxed);
        self.active_connections_gauge.inc();
    }

    /// Decrement active connections
    pub fn decrement_active_connections(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
        self.active_connections_gauge.dec();
    }

    /// Get metrics summary
    pub fn get_metrics(&self) -> MetricsSummary {
        let avg_response_time = if self.response_count.load(Ordering::Relaxed) > 0 {
            self.total_response_time.load(Ordering::Relaxed) as f64
                / self.response_count.load(Ordering::Relaxed) as f64
        } else {
            0.0
        };

        MetricsSummary {
            orders_submitted: self.orders_counter.get(),
            webhooks_received: self.webhooks_counter.get(),
            avg_response_time_ms: avg_response_time,
            active_connections: self.active_connections.load(Ordering::Relaxed),
            rate_limited_requests: self.rate_limited_requests.load(Ordering::Relaxed),
        }
    }
}

impl Default for MonitoringAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics summary for monitoring
pub struct MetricsSummary {
    pub orders_submitted: f64,
    pub webhooks_received: f64,
    pub avg_response_time_ms: f64,
    pub active_connections: u32,
    pub rate_limited_requests: u64,
}
