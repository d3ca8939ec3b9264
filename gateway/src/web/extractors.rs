// gateway/src/web/extractors.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Deserialize;
use tracing::warn;
use trade_core::ObjectId;

use crate::errors::AppError;

/// The `{id}` path segment, parsed as a record identifier.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub ObjectId);

impl FromRequest for RecordId {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(raw) = req.match_info().get("id") else {
      return ready(Err(AppError::Internal("route has no {id} segment".to_string())));
    };
    ready(
      ObjectId::parse_str(raw)
        .map(RecordId)
        .map_err(AppError::from),
    )
  }
}

#[derive(Debug, Deserialize)]
struct OwnerQuery {
  email: Option<String>,
}

/// The `email` query parameter that scopes "my" listings. Not authenticated.
#[derive(Debug, Clone)]
pub struct OwnerEmail(pub String);

impl FromRequest for OwnerEmail {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let email = web::Query::<OwnerQuery>::from_query(req.query_string())
      .ok()
      .and_then(|q| q.into_inner().email)
      .map(|e| e.trim().to_string())
      .filter(|e| !e.is_empty());

    match email {
      Some(email) => ready(Ok(OwnerEmail(email))),
      None => {
        warn!(path = %req.path(), "OwnerEmail extractor: missing email query parameter.");
        ready(Err(AppError::MissingParameter("email query parameter is required".to_string())))
      }
    }
  }
}
