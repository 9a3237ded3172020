//! PesaPal Gateway Server - Payment orchestration for a bakery storefront
//!
//! This library provides an HTTP service that proxies order initiation to the
//! PesaPal payment gateway and reconciles the gateway's asynchronous IPN
//! webhook deliveries against locally tracked transaction and order state.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

#[cfg(test)]
pub mod tests;

pub use config::AppConfig;
pub use infrastructure::http::server::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
