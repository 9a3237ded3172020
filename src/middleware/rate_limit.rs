//! Per-IP rate limiting middleware

use crate::config::AppConfig;
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiting middleware keyed by client IP
pub struct RateLimitMiddleware {
    config: AppConfig,
    limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
}

impl RateLimitMiddleware {
    /// Create a new rate limiting middleware
    pub fn new(config: AppConfig) -> Self {
        let limiter = if config.rate_limit.enabled {
            let per_minute = NonZeroU32::new(config.rate_limit.requests_per_minute)
                .unwrap_or(NonZeroU32::MIN);
            let burst = NonZeroU32::new(config.rate_limit.burst_size).unwrap_or(NonZeroU32::MIN);

            let quota = Quota::per_minute(per_minute).allow_burst(burst);
            Some(Arc::new(RateLimiter::keyed(quota)))
        } else {
            None
        };

        Self { config, limiter }
    }

    /// Check the rate limit for a client IP
    pub fn check_rate_limit(&self, client_ip: &str) -> AppResult<()> {
        if let Some(limiter) = &self.limiter {
            if limiter.check_key(&client_ip.to_string()).is_err() {
                LoggingUtils::log_rate_limit(client_ip, self.config.rate_limit.requests_per_minute);
                return Err(AppError::RateLimit);
            }
        }

        Ok(())
    }
}
