// gateway/src/store/mod.rs

//! Store backends owned by the gateway process.

pub mod postgres;

pub use postgres::PgDocumentStore;

use crate::config::{AppConfig, StoreBackend};
use crate::errors::{AppError, Result};
use std::sync::Arc;
use trade_core::{DocumentStore, MemoryStore};

/// Builds the configured backend. Called once at startup.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
  match config.store_backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory document store; data is lost on restart.");
      Ok(Arc::new(MemoryStore::new()))
    }
    StoreBackend::Postgres => {
      let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
      let store = PgDocumentStore::connect(url, config.database_max_connections).await?;
      tracing::info!("Successfully connected to the database.");
      Ok(Arc::new(store))
    }
  }
}
