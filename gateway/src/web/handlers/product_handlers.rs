// gateway/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};
use trade_core::models::product::{fields, normalize_stock};
use trade_core::query::LATEST_PRODUCTS_LIMIT;
use trade_core::{into_document, list_products, Collection, Filter, FindOptions, ProductListParams, ProductQuery, SortKey};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::RecordId;

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ProductListParams>,
) -> Result<HttpResponse, AppError> {
  let query = ProductQuery::from_params(&query_params)?;
  let page = list_products(app_state.store.as_ref(), &query).await?;
  info!(
    total = page.total,
    returned = page.products.len(),
    page = page.current_page,
    "Products listed."
  );
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::get_product", skip(app_state, id), fields(product_id = %id.0))]
pub async fn get_product_handler(app_state: web::Data<AppState>, id: RecordId) -> Result<HttpResponse, AppError> {
  match app_state.store.find_one(Collection::Products, &Filter::id(id.0)).await? {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => {
      warn!("Product with ID {} not found.", id.0);
      Err(AppError::NotFound("Product not found".to_string()))
    }
  }
}

#[instrument(name = "handler::latest_products", skip(app_state))]
pub async fn latest_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let options = FindOptions::all()
    .sort(SortKey::desc(fields::EXPORT_AT))
    .limit(LATEST_PRODUCTS_LIMIT);
  let products = app_state.store.find(Collection::Products, &options).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::top_rated_products", skip(app_state))]
pub async fn top_rated_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let options = FindOptions::all().sort(SortKey::desc(fields::RATING));
  let products = app_state.store.find(Collection::Products, &options).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let mut product = into_document(body.into_inner())?;
  normalize_stock(&mut product)?;
  let inserted = app_state.store.insert_one(Collection::Products, product).await?;
  info!(product_id = %inserted.inserted_id, "Product created.");
  Ok(HttpResponse::Ok().json(inserted))
}
