//! Redis-backed payment transactions store

use crate::domain::payments::PaymentTransaction;
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;

/// Abstraction for persisting payment transactions keyed by tracking id
#[derive(Clone)]
pub struct TransactionsStore {
    redis: Option<Arc<ConnectionManager>>, // optional; can operate in-memory only if None
    memory: Arc<tokio::sync::RwLock<std::collections::HashMap<String, PaymentTransaction>>>,
    retention_hours: u64,
}

impl TransactionsStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>, retention_hours: u64) -> Self {
        Self {
            redis,
            memory: Arc::new(tokio::sync::RwLock::new(std::collections::HashMap::new())),
            retention_hours,
        }
    }

    fn key(tracking_id: &str) -> String {
        format!("transactions:{}", tracking_id)
    }

    /// Upsert a transaction record by tracking id.
    ///
    /// A single keyed write, so concurrent upserts for the same tracking id
    /// resolve last-write-wins.
    pub async fn upsert(&self, transaction: &PaymentTransaction) -> AppResult<()> {
        let serialized = serde_json::to_vec(transaction)
            .map_err(|e| AppError::Persistence(format!("serialize transaction: {}", e)))?;

        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let key = Self::key(&transaction.tracking_id);
            let _: () = conn
                .set_ex(key, serialized, self.retention_hours * 3600)
                .await
                .map_err(|e| AppError::Persistence(format!("redis set: {}", e)))?;
        }

        // Always mirror to memory
        self.memory
            .write()
            .await
            .insert(transaction.tracking_id.clone(), transaction.clone());
        Ok(())
    }

    pub async fn get(&self, tracking_id: &str) -> AppResult<Option<PaymentTransaction>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let key = Self::key(tracking_id);
            let data: Option<Vec<u8>> = conn
                .get(key)
                .await
                .map_err(|e| AppError::Persistence(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let transaction: PaymentTransaction = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Persistence(format!("deserialize transaction: {}", e)))?;
                // mirror to memory
                self.memory
                    .write()
                    .await
                    .insert(tracking_id.to_string(), transaction.clone());
                return Ok(Some(transaction));
            }
        }
        Ok(self.memory.read().await.get(tracking_id).cloned())
    }
}
