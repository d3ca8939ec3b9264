// gateway/src/web/handlers/export_handlers.rs

//! "My export" routes: products scoped to the exporter's email.

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument};
use trade_core::models::product::{fields, normalize_stock};
use trade_core::{into_document, Collection, Filter, FindOptions, Update, ID_FIELD};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{OwnerEmail, RecordId};

#[instrument(name = "handler::my_exports", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn my_exports_handler(app_state: web::Data<AppState>, owner: OwnerEmail) -> Result<HttpResponse, AppError> {
  let options = FindOptions::new(Filter::eq(fields::EXPORT_BY, owner.0));
  let products = app_state.store.find(Collection::Products, &options).await?;
  info!("Found {} exported products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::update_export", skip(app_state, id, body), fields(product_id = %id.0))]
pub async fn update_export_handler(
  app_state: web::Data<AppState>,
  id: RecordId,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let mut fields_to_set = into_document(body.into_inner())?;
  fields_to_set.remove(ID_FIELD);
  normalize_stock(&mut fields_to_set)?;

  let result = app_state
    .store
    .update_one(Collection::Products, &Filter::id(id.0), &Update::set(fields_to_set))
    .await?;
  info!(
    matched = result.matched_count,
    modified = result.modified_count,
    "Export update applied."
  );
  Ok(HttpResponse::Ok().json(result))
}

#[instrument(name = "handler::delete_export", skip(app_state, id), fields(product_id = %id.0))]
pub async fn delete_export_handler(app_state: web::Data<AppState>, id: RecordId) -> Result<HttpResponse, AppError> {
  let result = app_state.store.delete_one(Collection::Products, &Filter::id(id.0)).await?;
  info!(deleted = result.deleted_count, "Export delete applied.");
  Ok(HttpResponse::Ok().json(result))
}
