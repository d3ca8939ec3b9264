// gateway/src/web/handlers/search_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};
use trade_core::query::name_search_filter;
use trade_core::{Collection, FindOptions};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
  pub search: Option<String>,
}

#[instrument(name = "handler::search_products", skip(app_state, query_params), fields(search = ?query_params.search))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = name_search_filter(query_params.search.as_deref())?;
  let products = app_state
    .store
    .find(Collection::Products, &FindOptions::new(filter))
    .await?;
  info!("Search matched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}
