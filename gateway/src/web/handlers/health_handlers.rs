// gateway/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

pub async fn root_handler() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain; charset=utf-8").body("Server is running")
}

#[instrument(name = "handler::health_check", skip(app_state))]
pub async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  app_state.store.ping().await?;
  Ok(HttpResponse::Ok().json(json!({
    "status": "ok",
    "store": app_state.store.backend_name(),
  })))
}
