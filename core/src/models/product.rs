// trade_core/src/models/product.rs

use crate::document::{as_f64_lenient, as_i64_lenient, Document};
use crate::error::{TradeError, TradeResult};
use serde_json::Value;

pub mod fields {
  pub const PRODUCT_NAME: &str = "productName";
  pub const BRAND: &str = "brand";
  pub const CATEGORY: &str = "category";
  pub const PRICE: &str = "price";
  pub const AVAILABLE_QUANTITY: &str = "availableQuantity";
  pub const RATING: &str = "rating";
  pub const EXPORT_AT: &str = "exportAt";
  pub const EXPORT_BY: &str = "exportBy";
}

/// The product fields the import workflow reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductView {
  pub product_name: Option<String>,
  pub category: Option<String>,
  pub price: Option<f64>,
  pub available_quantity: Option<i64>,
}

impl ProductView {
  pub fn from_document(doc: &Document) -> Self {
    let text = |field: &str| doc.get(field).and_then(Value::as_str).map(str::to_string);
    ProductView {
      product_name: text(fields::PRODUCT_NAME),
      category: text(fields::CATEGORY),
      price: doc.get(fields::PRICE).and_then(as_f64_lenient),
      available_quantity: doc.get(fields::AVAILABLE_QUANTITY).and_then(as_i64_lenient),
    }
  }
}

/// Stores `availableQuantity` as a JSON integer. Numeric strings ("10",
/// "10.0") are converted; any other non-null value is rejected.
pub fn normalize_stock(doc: &mut Document) -> TradeResult<()> {
  let Some(value) = doc.get_mut(fields::AVAILABLE_QUANTITY) else {
    return Ok(());
  };
  if value.is_null() || value.is_i64() {
    return Ok(());
  }
  match as_i64_lenient(value) {
    Some(quantity) => {
      *value = Value::from(quantity);
      Ok(())
    }
    None => Err(TradeError::InvalidDocument {
      message: format!("availableQuantity must be a whole number, got {}", value),
    }),
  }
}
