// trade_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradeError {
  #[error("Invalid identifier '{value}': expected 24 hexadecimal characters")]
  InvalidObjectId { value: String },

  #[error("Invalid quantity '{value}': userQuantity must be a positive integer")]
  InvalidQuantity { value: String },

  #[error("Invalid document: {message}")]
  InvalidDocument { message: String },

  #[error("Invalid search pattern: {0}")]
  InvalidPattern(#[from] regex::Error),

  #[error("Product not found: {id}")]
  ProductNotFound { id: String },

  #[error("Insufficient stock for product {id}: requested {requested}, available {available}")]
  InsufficientStock { id: String, requested: i64, available: i64 },

  #[error("Cannot increment non-numeric field '{field}' in collection '{collection}'")]
  NonNumericField { collection: String, field: String },

  #[error("Document store failure. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },

  #[error("Document serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),
}

// Store backends report their own errors through anyhow.
impl From<AnyhowError> for TradeError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<TradeError>() {
      Ok(trade_err) => trade_err,
      Err(err) => TradeError::Backend { source: err },
    }
  }
}

pub type TradeResult<T, E = TradeError> = std::result::Result<T, E>;
