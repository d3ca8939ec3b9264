// gateway/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{debug, instrument};
use trade_core::analytics;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::OwnerEmail;

#[instrument(name = "handler::dashboard_summary", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn summary_handler(app_state: web::Data<AppState>, owner: OwnerEmail) -> Result<HttpResponse, AppError> {
  let summary = analytics::summary(app_state.store.as_ref(), &owner.0).await?;
  debug!(?summary, "Dashboard summary computed.");
  Ok(HttpResponse::Ok().json(summary))
}

#[instrument(name = "handler::import_analytics", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn import_analytics_handler(
  app_state: web::Data<AppState>,
  owner: OwnerEmail,
) -> Result<HttpResponse, AppError> {
  let stats = analytics::import_analytics(app_state.store.as_ref(), &owner.0).await?;
  Ok(HttpResponse::Ok().json(stats))
}

#[instrument(name = "handler::monthly_imports", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn monthly_imports_handler(
  app_state: web::Data<AppState>,
  owner: OwnerEmail,
) -> Result<HttpResponse, AppError> {
  let months = analytics::monthly_imports(app_state.store.as_ref(), &owner.0, chrono::Utc::now()).await?;
  Ok(HttpResponse::Ok().json(months))
}

#[instrument(name = "handler::recent_imports", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn recent_imports_handler(
  app_state: web::Data<AppState>,
  owner: OwnerEmail,
) -> Result<HttpResponse, AppError> {
  let imports = analytics::recent_imports(app_state.store.as_ref(), &owner.0).await?;
  Ok(HttpResponse::Ok().json(imports))
}

#[instrument(name = "handler::recent_exports", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn recent_exports_handler(
  app_state: web::Data<AppState>,
  owner: OwnerEmail,
) -> Result<HttpResponse, AppError> {
  let exports = analytics::recent_exports(app_state.store.as_ref(), &owner.0).await?;
  Ok(HttpResponse::Ok().json(exports))
}
