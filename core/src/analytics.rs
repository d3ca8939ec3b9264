// trade_core/src/analytics.rs

//! Dashboard aggregation. Imports are fetched per owner and grouped in
//! memory; nothing here is pushed down to the store.

use crate::document::Document;
use crate::error::TradeResult;
use crate::filter::{Filter, SortKey};
use crate::models::import_record::fields as import_fields;
use crate::models::product::fields as product_fields;
use crate::models::ImportView;
use crate::query::RECENT_ACTIVITY_LIMIT;
use crate::store::{Collection, DocumentStore, FindOptions};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const UNCATEGORIZED: &str = "Uncategorized";

pub const MONTH_NAMES: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub total_products: u64,
  pub my_products: u64,
  pub my_imports: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
  pub category: String,
  pub count: u64,
  pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
  pub month: &'static str,
  pub month_index: u32,
  pub count: u64,
  pub total_value: f64,
}

/// Groups imports by category in first-seen order. Unparseable quantities add 0.
pub fn category_breakdown(imports: &[Document]) -> Vec<CategoryStat> {
  let mut stats: Vec<CategoryStat> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for doc in imports {
    let view = ImportView::from_document(doc);
    let category = view.category.unwrap_or_else(|| UNCATEGORIZED.to_string());
    let slot = *index.entry(category.clone()).or_insert_with(|| {
      stats.push(CategoryStat {
        category,
        count: 0,
        total_quantity: 0,
      });
      stats.len() - 1
    });
    let stat = &mut stats[slot];
    stat.count += 1;
    stat.total_quantity = stat.total_quantity.saturating_add(view.user_quantity.unwrap_or(0));
  }
  stats
}

/// Twelve entries, January first. `now` dates imports with no usable timestamp.
pub fn monthly_totals(imports: &[Document], now: DateTime<Utc>) -> Vec<MonthlyStat> {
  let mut months: Vec<MonthlyStat> = MONTH_NAMES
    .iter()
    .zip(0u32..)
    .map(|(name, month_index)| MonthlyStat {
      month: name,
      month_index,
      count: 0,
      total_value: 0.0,
    })
    .collect();

  for doc in imports {
    let view = ImportView::from_document(doc);
    let month = view.occurred_at().unwrap_or(now).month0() as usize;
    let quantity = view.user_quantity.unwrap_or(1) as f64;
    let price = view.price.unwrap_or(0.0);

    let entry = &mut months[month];
    entry.count += 1;
    entry.total_value += price * quantity;
  }
  months
}

#[instrument(name = "analytics::summary", skip(store))]
pub async fn summary(store: &dyn DocumentStore, email: &str) -> TradeResult<DashboardSummary> {
  let total_products = store.count(Collection::Products, &Filter::All).await?;
  let my_products = store
    .count(Collection::Products, &Filter::eq(product_fields::EXPORT_BY, email))
    .await?;
  let my_imports = store
    .count(Collection::Imports, &Filter::eq(import_fields::IMPORT_BY, email))
    .await?;
  Ok(DashboardSummary {
    total_products,
    my_products,
    my_imports,
  })
}

pub async fn imports_by_owner(store: &dyn DocumentStore, email: &str) -> TradeResult<Vec<Document>> {
  let options = FindOptions::new(Filter::eq(import_fields::IMPORT_BY, email));
  store.find(Collection::Imports, &options).await
}

#[instrument(name = "analytics::import_analytics", skip(store))]
pub async fn import_analytics(store: &dyn DocumentStore, email: &str) -> TradeResult<Vec<CategoryStat>> {
  let imports = imports_by_owner(store, email).await?;
  let stats = category_breakdown(&imports);
  debug!(imports = imports.len(), groups = stats.len(), "category breakdown computed");
  Ok(stats)
}

#[instrument(name = "analytics::monthly_imports", skip(store, now))]
pub async fn monthly_imports(
  store: &dyn DocumentStore,
  email: &str,
  now: DateTime<Utc>,
) -> TradeResult<Vec<MonthlyStat>> {
  let imports = imports_by_owner(store, email).await?;
  Ok(monthly_totals(&imports, now))
}

pub async fn recent_imports(store: &dyn DocumentStore, email: &str) -> TradeResult<Vec<Document>> {
  let options = FindOptions::new(Filter::eq(import_fields::IMPORT_BY, email))
    .sort(SortKey::desc(import_fields::EXPORT_AT))
    .limit(RECENT_ACTIVITY_LIMIT);
  store.find(Collection::Imports, &options).await
}

pub async fn recent_exports(store: &dyn DocumentStore, email: &str) -> TradeResult<Vec<Document>> {
  let options = FindOptions::new(Filter::eq(product_fields::EXPORT_BY, email))
    .sort(SortKey::desc(product_fields::EXPORT_AT))
    .limit(RECENT_ACTIVITY_LIMIT);
  store.find(Collection::Products, &options).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::into_document;
  use chrono::TimeZone;
  use serde_json::json;

  fn docs(values: Vec<serde_json::Value>) -> Vec<Document> {
    values.into_iter().map(|v| into_document(v).unwrap()).collect()
  }

  #[test]
  fn breakdown_groups_missing_and_blank_categories_together() {
    let imports = docs(vec![
      json!({"category": "Tea", "userQuantity": 2}),
      json!({"userQuantity": "3"}),
      json!({"category": "  ", "userQuantity": 1}),
      json!({"category": "Tea", "userQuantity": "x"}),
    ]);
    let stats = category_breakdown(&imports);
    assert_eq!(
      stats,
      vec![
        CategoryStat { category: "Tea".into(), count: 2, total_quantity: 2 },
        CategoryStat { category: UNCATEGORIZED.into(), count: 2, total_quantity: 4 },
      ]
    );
  }

  #[test]
  fn monthly_totals_fall_back_through_created_at_and_now() {
    let now = Utc.with_ymd_and_hms(2024, 9, 10, 0, 0, 0).unwrap();
    let imports = docs(vec![
      json!({"exportAt": "2024-02-01T00:00:00Z", "createdAt": "2024-05-01", "price": 10, "userQuantity": 3}),
      json!({"exportAt": "not a date", "createdAt": "2024-05-20", "price": "2.5", "userQuantity": "bad"}),
      json!({"price": 4, "userQuantity": 2}),
    ]);
    let months = monthly_totals(&imports, now);
    assert_eq!(months.len(), 12);
    assert_eq!((months[1].count, months[1].total_value), (1, 30.0));
    assert_eq!((months[4].count, months[4].total_value), (1, 2.5));
    assert_eq!((months[8].count, months[8].total_value), (1, 8.0));
    assert_eq!(months.iter().map(|m| m.count).sum::<u64>(), 3);
  }
}
