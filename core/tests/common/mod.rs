// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use trade_core::{into_document, Collection, Document, DocumentStore, MemoryStore, ObjectId};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn doc(value: Value) -> Document {
  into_document(value).expect("fixture must be a JSON object")
}

pub fn product(name: &str, brand: &str, category: &str, price: f64, rating: f64, export_at: &str, owner: &str) -> Document {
  doc(json!({
    "productName": name,
    "brand": brand,
    "category": category,
    "price": price,
    "rating": rating,
    "availableQuantity": 10,
    "exportAt": export_at,
    "exportBy": owner,
  }))
}

/// Twelve products over three categories, exported across 2024 by two owners.
pub fn catalog() -> Vec<Document> {
  vec![
    product("Green Tea", "Leafy", "Tea", 12.0, 4.5, "2024-01-10T09:00:00Z", "alice@trade.io"),
    product("Black Tea", "Leafy", "Tea", 9.5, 3.9, "2024-02-11T09:00:00Z", "alice@trade.io"),
    product("Oolong", "Mountain", "Tea", 22.0, 4.8, "2024-03-12T09:00:00Z", "bob@trade.io"),
    product("Saffron", "Crimson", "Spices", 80.0, 4.9, "2024-04-13T09:00:00Z", "bob@trade.io"),
    product("Cumin", "Crimson", "Spices", 4.0, 3.2, "2024-05-14T09:00:00Z", "alice@trade.io"),
    product("Cardamom", "Hillside", "Spices", 15.0, 4.1, "2024-06-15T09:00:00Z", "bob@trade.io"),
    product("Arabica Beans", "Highland", "Coffee", 18.0, 4.6, "2024-07-16T09:00:00Z", "alice@trade.io"),
    product("Robusta Beans", "Highland", "Coffee", 11.0, 3.5, "2024-08-17T09:00:00Z", "bob@trade.io"),
    product("Espresso Roast", "Tea & Co", "Coffee", 16.5, 4.0, "2024-09-18T09:00:00Z", "alice@trade.io"),
    product("Matcha", "Leafy", "Tea", 30.0, 4.7, "2024-10-19T09:00:00Z", "bob@trade.io"),
    product("Turmeric", "Hillside", "Spices", 6.0, 3.8, "2024-11-20T09:00:00Z", "alice@trade.io"),
    product("Decaf Blend", "Highland", "Coffee", 14.0, 2.9, "2024-12-21T09:00:00Z", "bob@trade.io"),
  ]
}

pub async fn seeded_store() -> (MemoryStore, Vec<ObjectId>) {
  let store = MemoryStore::new();
  let mut ids = Vec::new();
  for product in catalog() {
    let inserted = store.insert_one(Collection::Products, product).await.unwrap();
    ids.push(inserted.inserted_id);
  }
  (store, ids)
}

pub fn price_of(doc: &Document) -> f64 {
  doc["price"].as_f64().unwrap()
}
