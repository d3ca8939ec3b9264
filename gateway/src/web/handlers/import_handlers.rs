// gateway/src/web/handlers/import_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};
use trade_core::models::import_record::fields;
use trade_core::{record_import, Collection, Filter, FindOptions, ImportRequest};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{OwnerEmail, RecordId};

#[instrument(
  name = "handler::create_import",
  skip(app_state, id, body),
  fields(product_id = %id.0, policy = ?app_state.config.stock_policy)
)]
pub async fn create_import_handler(
  app_state: web::Data<AppState>,
  id: RecordId,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  // The identifier is extracted before the body, then the quantity is checked. Nothing is written yet.
  let request = ImportRequest::new(id.0, body.into_inner())?;
  info!(quantity = request.quantity, "Import request validated.");

  match record_import(app_state.store.as_ref(), request, app_state.config.stock_policy).await {
    Ok(outcome) => {
      info!(
        import_id = %outcome.result.inserted_id,
        available = ?outcome.available_quantity,
        "Import recorded."
      );
      Ok(HttpResponse::Ok().json(outcome))
    }
    Err(e) => {
      warn!("Import against product {} failed: {}", id.0, e);
      Err(e.into())
    }
  }
}

#[instrument(name = "handler::my_imports", skip(app_state, owner), fields(owner = %owner.0))]
pub async fn my_imports_handler(app_state: web::Data<AppState>, owner: OwnerEmail) -> Result<HttpResponse, AppError> {
  let options = FindOptions::new(Filter::eq(fields::IMPORT_BY, owner.0));
  let imports = app_state.store.find(Collection::Imports, &options).await?;
  info!("Found {} imports.", imports.len());
  Ok(HttpResponse::Ok().json(imports))
}

#[instrument(name = "handler::delete_import", skip(app_state, id), fields(import_id = %id.0))]
pub async fn delete_import_handler(app_state: web::Data<AppState>, id: RecordId) -> Result<HttpResponse, AppError> {
  let result = app_state.store.delete_one(Collection::Imports, &Filter::id(id.0)).await?;
  info!(deleted = result.deleted_count, "Import delete applied.");
  Ok(HttpResponse::Ok().json(result))
}
