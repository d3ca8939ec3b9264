// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use trade_core::{into_document, Collection, DocumentStore, MemoryStore, ObjectId};
use trade_gateway::{AppConfig, AppState};

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Builds the full route table over `$state` and starts a test service.
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new().configure(|cfg| trade_gateway::web::configure_app(cfg, &$state)),
    )
    .await
  };
}

pub const MISSING_ID: &str = "64b7f0c2e4b0a1a2b3c4d5e6";

pub struct Fixture {
  pub store: Arc<MemoryStore>,
  pub state: AppState,
  pub product_ids: Vec<ObjectId>,
}

pub async fn fixture_with(config: AppConfig) -> Fixture {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let products = [
    json!({"productName": "Green Tea", "brand": "Leafy", "category": "Tea", "price": 12.0, "rating": 4.5,
           "availableQuantity": 10, "exportAt": "2024-01-10T09:00:00Z", "exportBy": "alice@trade.io"}),
    json!({"productName": "Saffron", "brand": "Crimson", "category": "Spices", "price": 80.0, "rating": 4.9,
           "availableQuantity": 3, "exportAt": "2024-04-13T09:00:00Z", "exportBy": "bob@trade.io"}),
    json!({"productName": "Arabica Beans", "brand": "Highland", "category": "Coffee", "price": 18.0, "rating": 4.6,
           "availableQuantity": 25, "exportAt": "2024-07-16T09:00:00Z", "exportBy": "alice@trade.io"}),
    json!({"productName": "Cumin", "brand": "Crimson", "category": "Spices", "price": 4.0, "rating": 3.2,
           "availableQuantity": 40, "exportAt": "2024-05-14T09:00:00Z", "exportBy": "alice@trade.io"}),
    json!({"productName": "Matcha", "brand": "Leafy", "category": "Tea", "price": 30.0, "rating": 4.7,
           "availableQuantity": 8, "exportAt": "2024-10-19T09:00:00Z", "exportBy": "bob@trade.io"}),
  ];
  let mut product_ids = Vec::new();
  for product in products {
    let inserted = store
      .insert_one(Collection::Products, into_document(product).unwrap())
      .await
      .unwrap();
    product_ids.push(inserted.inserted_id);
  }
  let state = AppState::new(store.clone(), config);
  Fixture {
    store,
    state,
    product_ids,
  }
}

pub async fn fixture() -> Fixture {
  fixture_with(AppConfig::default()).await
}

pub fn names(items: &Value) -> Vec<String> {
  items
    .as_array()
    .expect("array body")
    .iter()
    .map(|d| d["productName"].as_str().unwrap_or_default().to_string())
    .collect()
}
