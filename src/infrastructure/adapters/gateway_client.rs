//! PesaPal gateway client adapter
//!
//! This adapter handles HTTP communication with the PesaPal payment gateway:
//! token acquisition, order submission, and the authoritative
//! transaction-status query used by the verification policy.

use crate::{
    config::AppConfig,
    domain::payments::AccessToken,
    shared::error::{AppError, AppResult},
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Adapter for the PesaPal gateway API
pub struct PesapalGatewayClient {
    config: Arc<AppConfig>,
    /// Client for token requests, bounded by the conservative token timeout
    token_client: Client,
    /// Client for order submission and status queries, bounded by the hard
    /// 30-second submission timeout
    submit_client: Client,
}

impl PesapalGatewayClient {
    /// Create a new gateway client
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let token_client = Client::builder()
            .timeout(Duration::from_secs(config.pesapal.token_timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let submit_client = Client::builder()
            .timeout(Duration::from_secs(config.pesapal.submit_timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            token_client,
            submit_client,
        })
    }

    /// Request a fresh access token from the gateway.
    ///
    /// Stateless: each call re-authenticates with the configured consumer
    /// credentials. No retry is attempted.
    pub async fn request_access_token(&self) -> AppResult<AccessToken> {
        let url = format!("{}/api/Auth/RequestToken", self.config.pesapal.base_url);

        debug!("Requesting gateway access token");

        let payload = serde_json::json!({
            "consumer_key": self.config.pesapal.consumer_key,
            "consumer_secret": self.config.pesapal.consumer_secret,
        });

        let response = self
            .token_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Token request failed: {}", e);
                AppError::Authentication {
                    status: None,
                    detail: format!("token request failed: {}", e),
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable response body>".to_string());

        if !status.is_success() {
            error!("Token endpoint returned status {}: {}", status, body);
            return Err(AppError::Authentication {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| AppError::Authentication {
            status: Some(status.as_u16()),
            detail: format!("invalid token response: {}", e),
        })?;

        match parsed.get("token").and_then(|t| t.as_str()) {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token.to_string())),
            _ => {
                error!("Token endpoint response carried no token field");
                Err(AppError::Authentication {
                    status: Some(status.as_u16()),
                    detail: body,
                })
            }
        }
    }

    /// Submit a merged order payload to the gateway.
    ///
    /// Returns the gateway's response body verbatim on 2xx. Any non-2xx,
    /// timeout, or transport failure is surfaced with the upstream status
    /// (500 when no response was received); no retry is attempted here.
    pub async fn submit_order_request(
        &self,
        token: &AccessToken,
        payload: &Value,
    ) -> AppResult<Value> {
        let url = format!(
            "{}/api/Transactions/SubmitOrderRequest",
            self.config.pesapal.base_url
        );

        debug!("Submitting order request to gateway");

        let response = self
            .submit_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Order submission failed: {}", e);
                let detail = if e.is_timeout() {
                    format!(
                        "order submission timed out after {}s",
                        self.config.pesapal.submit_timeout_seconds
                    )
                } else {
                    format!("order submission failed: {}", e)
                };
                AppError::gateway_submission(e.status().map(|s| s.as_u16()), detail)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable response body>".to_string());

        if !status.is_success() {
            error!("Order endpoint returned status {}: {}", status, body);
            return Err(AppError::gateway_submission(Some(status.as_u16()), body));
        }

        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| AppError::gateway_submission(Some(status.as_u16()), format!("invalid order response: {}", e)))?;

        info!("Order accepted by gateway");
        Ok(parsed)
    }

    /// Query the authoritative status of a transaction.
    ///
    /// Used by the verify-with-gateway reconciliation policy instead of
    /// trusting the webhook's mere arrival.
    pub async fn get_transaction_status(
        &self,
        token: &AccessToken,
        tracking_id: &str,
    ) -> AppResult<Value> {
        let url = format!(
            "{}/api/Transactions/GetTransactionStatus",
            self.config.pesapal.base_url
        );

        debug!(tracking_id = %tracking_id, "Querying gateway transaction status");

        let response = self
            .submit_client
            .get(&url)
            .query(&[("orderTrackingId", tracking_id)])
            .header("Accept", "application/json")
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| AppError::Http(format!("transaction status query failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable response body>".to_string());
            return Err(AppError::Http(format!(
                "transaction status query returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Http(format!("invalid transaction status response: {}", e)))
    }

    /// Check if the gateway is reachable
    pub async fn is_available(&self) -> bool {
        // Short timeout for health probes
        let client = match Client::builder().timeout(Duration::from_secs(5)).build() {
            Ok(client) => client,
            Err(_) => return false,
        };

        match client.get(&self.config.pesapal.base_url).send().await {
            Ok(_) => true,
            Err(_) => false,
        }
    }
}
