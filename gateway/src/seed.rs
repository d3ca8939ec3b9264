// gateway/src/seed.rs

//! Sample catalog inserted at startup when `SEED_DB=true` and the products
//! collection is empty.

use chrono::{Duration, Utc};
use serde_json::json;
use trade_core::{into_document, Collection, DocumentStore, Filter, TradeResult};

const SAMPLE_OWNER: &str = "demo.exporter@example.com";

// (productName, brand, category, price, availableQuantity, rating)
const SAMPLES: [(&str, &str, &str, f64, i64, f64); 6] = [
  ("Assam Black Tea", "Brahmaputra Estates", "Tea", 12.5, 120, 4.4),
  ("Ceylon Cinnamon Sticks", "Spice Route", "Spices", 8.0, 300, 4.7),
  ("Arabica Green Beans", "Highland Growers", "Coffee", 19.9, 80, 4.6),
  ("Basmati Rice 5kg", "Punjab Fields", "Grains", 14.0, 200, 4.2),
  ("Extra Virgin Olive Oil", "Aegean Press", "Oils", 22.0, 60, 4.8),
  ("Saffron Threads 2g", "Spice Route", "Spices", 11.5, 45, 4.9),
];

pub async fn seed_if_empty(store: &dyn DocumentStore) -> TradeResult<usize> {
  if store.count(Collection::Products, &Filter::All).await? > 0 {
    tracing::info!("Products collection is not empty; skipping seed.");
    return Ok(0);
  }

  let now = Utc::now();
  for (days_ago, (name, brand, category, price, quantity, rating)) in (0i64..).zip(SAMPLES) {
    let export_at = (now - Duration::days(days_ago)).to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let product = into_document(json!({
      "productName": name,
      "brand": brand,
      "category": category,
      "price": price,
      "availableQuantity": quantity,
      "rating": rating,
      "exportAt": export_at,
      "exportBy": SAMPLE_OWNER,
    }))?;
    store.insert_one(Collection::Products, product).await?;
  }
  tracing::info!(count = SAMPLES.len(), "Seeded sample products.");
  Ok(SAMPLES.len())
}
