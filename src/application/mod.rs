//! Application layer - Use cases and application services
//!
//! This module contains application services that orchestrate domain logic
//! and handle use cases for the payment-orchestration server.

pub mod services;
pub mod use_cases;

pub use services::*;
pub use use_cases::*;
