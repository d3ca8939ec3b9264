// gateway/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use trade_core::TradeError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Invalid identifier: {0}")]
  InvalidIdentifier(String),

  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Missing parameter: {0}")]
  MissingParameter(String),

  /// Answered with 200 and a sentinel body, not 404.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
  InsufficientStock { id: String, requested: i64, available: i64 },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Document Store Error: {source}")]
  Store { source: TradeError },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<TradeError> for AppError {
  fn from(err: TradeError) -> Self {
    match err {
      TradeError::InvalidObjectId { value } => {
        AppError::InvalidIdentifier(format!("'{}' is not a 24-character hexadecimal identifier", value))
      }
      TradeError::InvalidQuantity { value } => {
        AppError::InvalidQuantity(format!("userQuantity must be a positive integer, got {}", value))
      }
      TradeError::InvalidDocument { message } => AppError::Validation(message),
      TradeError::InvalidPattern(e) => AppError::Validation(e.to_string()),
      TradeError::ProductNotFound { .. } => AppError::NotFound("Product not found".to_string()),
      TradeError::InsufficientStock {
        id,
        requested,
        available,
      } => AppError::InsufficientStock {
        id,
        requested,
        available,
      },
      other => AppError::Store { source: other },
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<TradeError>() {
      Ok(trade_err) => trade_err.into(),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::InvalidIdentifier(_)
      | AppError::InvalidQuantity(_)
      | AppError::Validation(_)
      | AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::OK,
      AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Store { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::NotFound(_) | AppError::InsufficientStock { .. } => {
        tracing::warn!(application_error = %self, "Responding with marker")
      }
      AppError::InvalidIdentifier(_)
      | AppError::InvalidQuantity(_)
      | AppError::Validation(_)
      | AppError::MissingParameter(_) => tracing::warn!(application_error = %self, "Rejecting request"),
      _ => tracing::error!(application_error = %self, "Responding with error"),
    }

    let mut builder = HttpResponse::build(self.status_code());
    match self {
      AppError::InvalidIdentifier(m)
      | AppError::InvalidQuantity(m)
      | AppError::Validation(m)
      | AppError::MissingParameter(m) => builder.json(json!({"error": m})),
      AppError::NotFound(m) => builder.json(json!({"found": false, "message": m})),
      AppError::InsufficientStock {
        requested, available, ..
      } => builder.json(json!({
        "error": "Insufficient stock",
        "requested": requested,
        "available": available,
      })),
      AppError::Config(m) => builder.json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Sqlx(e) => builder.json(json!({"error": "Database operation failed", "detail": e.to_string()})),
      AppError::Store { source } => {
        builder.json(json!({"error": "Document store operation failed", "detail": source.to_string()}))
      }
      AppError::Internal(m) => builder.json(json!({"error": "An internal error occurred", "detail": m})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
