//! Redis-backed order payment-status store
//!
//! Order placement is owned by the storefront; this store exposes only the
//! collaborator contract this subsystem needs: seeding a record and updating
//! its payment status.

use crate::domain::payments::{OrderRecord, PaymentStatus};
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;

/// Abstraction for persisting order payment-status records keyed by order id
#[derive(Clone)]
pub struct OrdersStore {
    redis: Option<Arc<ConnectionManager>>, // optional; can operate in-memory only if None
    memory: Arc<tokio::sync::RwLock<std::collections::HashMap<String, OrderRecord>>>,
}

impl OrdersStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>) -> Self {
        Self {
            redis,
            memory: Arc::new(tokio::sync::RwLock::new(std::collections::HashMap::new())),
        }
    }

    fn key(order_id: &str) -> String {
        format!("orders:{}", order_id)
    }

    pub async fn put(&self, record: &OrderRecord) -> AppResult<()> {
        let serialized = serde_json::to_vec(record)
            .map_err(|e| AppError::Persistence(format!("serialize order: {}", e)))?;

        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let key = Self::key(&record.order_id);
            let _: () = conn
                .set(key, serialized)
                .await
                .map_err(|e| AppError::Persistence(format!("redis set: {}", e)))?;
        }

        // Always mirror to memory
        self.memory
            .write()
            .await
            .insert(record.order_id.clone(), record.clone());
        Ok(())
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Option<OrderRecord>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let key = Self::key(order_id);
            let data: Option<Vec<u8>> = conn
                .get(key)
                .await
                .map_err(|e| AppError::Persistence(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let record: OrderRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Persistence(format!("deserialize order: {}", e)))?;
                self.memory
                    .write()
                    .await
                    .insert(order_id.to_string(), record.clone());
                return Ok(Some(record));
            }
        }
        Ok(self.memory.read().await.get(order_id).cloned())
    }

    /// Update the payment status of an existing order.
    ///
    /// Errors when the order is unknown; the caller decides whether that is
    /// fatal (the webhook reconciler logs and continues).
    pub async fn update_status(&self, order_id: &str, status: PaymentStatus) -> AppResult<()> {
        let mut record = self
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::Persistence(format!("unknown order: {}", order_id)))?;

        record.payment_status = status;
        record.updated_at = chrono::Utc::now();
        self.put(&record).await
    }
}
