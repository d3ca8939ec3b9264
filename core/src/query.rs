// trade_core/src/query.rs

//! Translates listing query-string parameters into a filter, a sort key and
//! skip/limit pagination, and runs the paginated listing.

use crate::document::Document;
use crate::error::TradeResult;
use crate::filter::{Filter, SortKey};
use crate::models::product::fields;
use crate::store::{Collection, DocumentStore, FindOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 8;
pub const ALL_SENTINEL: &str = "all";
pub const LATEST_PRODUCTS_LIMIT: u64 = 6;
pub const RECENT_ACTIVITY_LIMIT: u64 = 3;

/// Raw listing parameters. Everything arrives as text and is parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
  pub page: Option<String>,
  pub limit: Option<String>,
  pub category: Option<String>,
  pub rating: Option<String>,
  pub sort: Option<String>,
  pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
  #[default]
  Newest,
  Oldest,
  PriceLow,
  PriceHigh,
}

impl ProductSort {
  /// Unknown values fall back to newest first.
  pub fn from_param(value: Option<&str>) -> Self {
    match value.map(str::trim) {
      Some("oldest") => ProductSort::Oldest,
      Some("price-low") => ProductSort::PriceLow,
      Some("price-high") => ProductSort::PriceHigh,
      _ => ProductSort::Newest,
    }
  }

  pub fn sort_key(&self) -> SortKey {
    match self {
      ProductSort::Newest => SortKey::desc(fields::EXPORT_AT),
      ProductSort::Oldest => SortKey::asc(fields::EXPORT_AT),
      ProductSort::PriceLow => SortKey::asc(fields::PRICE),
      ProductSort::PriceHigh => SortKey::desc(fields::PRICE),
    }
  }
}

#[derive(Debug, Clone)]
pub struct ProductQuery {
  pub filter: Filter,
  pub sort: ProductSort,
  pub page: u64,
  pub limit: u64,
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
  value
    .and_then(|v| v.trim().parse::<u64>().ok())
    .filter(|v| *v >= 1)
    .unwrap_or(default)
}

fn active(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

impl ProductQuery {
  pub fn from_params(params: &ProductListParams) -> TradeResult<Self> {
    let mut clauses = Vec::new();

    if let Some(category) = active(params.category.as_deref()) {
      clauses.push(Filter::eq(fields::CATEGORY, category));
    }

    // An unparseable threshold means "no rating filter".
    if let Some(threshold) = active(params.rating.as_deref()).and_then(|r| r.parse::<f64>().ok()) {
      if threshold.is_finite() {
        clauses.push(Filter::gte(fields::RATING, threshold));
      }
    }

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
      clauses.push(Filter::or(vec![
        Filter::contains_ignore_case(fields::PRODUCT_NAME, search)?,
        Filter::contains_ignore_case(fields::BRAND, search)?,
        Filter::contains_ignore_case(fields::CATEGORY, search)?,
      ]));
    }

    Ok(ProductQuery {
      filter: Filter::and(clauses),
      sort: ProductSort::from_param(params.sort.as_deref()),
      page: positive_or(params.page.as_deref(), DEFAULT_PAGE),
      limit: positive_or(params.limit.as_deref(), DEFAULT_LIMIT),
    })
  }

  pub fn skip(&self) -> u64 {
    (self.page - 1).saturating_mul(self.limit)
  }

  pub fn find_options(&self) -> FindOptions {
    FindOptions::new(self.filter.clone())
      .sort(self.sort.sort_key())
      .skip(self.skip())
      .limit(self.limit)
  }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
  if limit == 0 {
    return 0;
  }
  total.div_ceil(limit)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
  pub products: Vec<Document>,
  pub total: u64,
  pub current_page: u64,
  pub total_pages: u64,
  pub limit: u64,
}

#[instrument(name = "query::list_products", skip(store, query), fields(page = query.page, limit = query.limit))]
pub async fn list_products(store: &dyn DocumentStore, query: &ProductQuery) -> TradeResult<ProductPage> {
  let total = store.count(Collection::Products, &query.filter).await?;
  let products = store.find(Collection::Products, &query.find_options()).await?;
  debug!(total, returned = products.len(), "listing assembled");

  Ok(ProductPage {
    products,
    total,
    current_page: query.page,
    total_pages: total_pages(total, query.limit),
    limit: query.limit,
  })
}

/// Name-only search used by `/search`. Empty or absent input matches everything.
pub fn name_search_filter(search: Option<&str>) -> TradeResult<Filter> {
  match search.filter(|s| !s.is_empty()) {
    Some(needle) => Filter::contains_ignore_case(fields::PRODUCT_NAME, needle),
    None => Ok(Filter::All),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(pairs: &[(&str, &str)]) -> ProductListParams {
    let mut p = ProductListParams::default();
    for (k, v) in pairs {
      let v = Some(v.to_string());
      match *k {
        "page" => p.page = v,
        "limit" => p.limit = v,
        "category" => p.category = v,
        "rating" => p.rating = v,
        "sort" => p.sort = v,
        "search" => p.search = v,
        _ => unreachable!(),
      }
    }
    p
  }

  #[test]
  fn defaults_apply_for_missing_or_bad_pagination() {
    let q = ProductQuery::from_params(&params(&[("page", "0"), ("limit", "lots")])).unwrap();
    assert_eq!((q.page, q.limit, q.skip()), (1, 8, 0));
    let q = ProductQuery::from_params(&params(&[("page", "3"), ("limit", "5")])).unwrap();
    assert_eq!(q.skip(), 10);
  }

  #[test]
  fn all_sentinel_and_bad_rating_add_no_clauses() {
    let q = ProductQuery::from_params(&params(&[("category", "all"), ("rating", "all")])).unwrap();
    assert!(matches!(q.filter, Filter::All));
    let q = ProductQuery::from_params(&params(&[("rating", "four")])).unwrap();
    assert!(matches!(q.filter, Filter::All));
  }

  #[test]
  fn sort_mapping() {
    assert_eq!(ProductSort::from_param(Some("oldest")).sort_key(), SortKey::asc("exportAt"));
    assert_eq!(ProductSort::from_param(Some("price-high")).sort_key(), SortKey::desc("price"));
    assert_eq!(ProductSort::from_param(Some("bogus")), ProductSort::Newest);
    assert_eq!(ProductSort::from_param(None).sort_key(), SortKey::desc("exportAt"));
  }

  #[test]
  fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 8), 0);
    assert_eq!(total_pages(8, 8), 1);
    assert_eq!(total_pages(9, 8), 2);
  }
}
