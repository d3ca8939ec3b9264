// trade_core/examples/import_walkthrough.rs

use serde_json::json;
use trade_core::analytics;
use trade_core::{
  into_document, record_import, Collection, DocumentStore, ImportRequest, MemoryStore, StockPolicy, TradeResult,
};
use tracing::info;

#[tokio::main]
async fn main() -> TradeResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Import Walkthrough ---");

  // 1. A store with one product listed by an exporter
  let store = MemoryStore::new();
  let product = into_document(json!({
    "productName": "Darjeeling",
    "brand": "Himal",
    "category": "Tea",
    "price": 14.0,
    "availableQuantity": 10,
    "rating": 4.6,
    "exportAt": "2024-04-02T08:00:00Z",
    "exportBy": "exporter@trade.io",
  }))?;
  let product_id = store.insert_one(Collection::Products, product).await?.inserted_id;
  info!(%product_id, "product listed");

  // 2. An importer takes 4 units
  let request = ImportRequest::new(
    product_id,
    json!({"userQuantity": 4, "importBy": "importer@trade.io", "exportAt": "2024-05-01T10:00:00Z"}),
  )?;
  let outcome = record_import(&store, request, StockPolicy::Guarded).await?;
  info!(available = ?outcome.available_quantity, "import recorded");

  // 3. Asking for more than what is left is refused
  let greedy = ImportRequest::new(product_id, json!({"userQuantity": 50}))?;
  if let Err(e) = record_import(&store, greedy, StockPolicy::Guarded).await {
    info!(error = %e, "second import refused");
  }

  // 4. The importer's dashboard
  let summary = analytics::summary(&store, "importer@trade.io").await?;
  info!(?summary, "summary");
  for month in analytics::monthly_imports(&store, "importer@trade.io", chrono::Utc::now())
    .await?
    .iter()
    .filter(|m| m.count > 0)
  {
    info!(month = month.month, count = month.count, value = month.total_value, "monthly");
  }

  info!("--- Import Walkthrough Finished ---");
  Ok(())
}
