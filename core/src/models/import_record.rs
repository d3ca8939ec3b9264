// trade_core/src/models/import_record.rs

use crate::document::{as_f64_lenient, as_i64_lenient, Document};
use crate::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use serde_json::Value;

pub mod fields {
  pub const PRODUCT_ID: &str = "productId";
  pub const PRODUCT_NAME: &str = "productName";
  pub const USER_QUANTITY: &str = "userQuantity";
  pub const IMPORT_BY: &str = "importBy";
  pub const CATEGORY: &str = "category";
  pub const PRICE: &str = "price";
  pub const EXPORT_AT: &str = "exportAt";
  pub const CREATED_AT: &str = "createdAt";
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportView {
  /// Non-empty string categories only.
  pub category: Option<String>,
  pub user_quantity: Option<i64>,
  pub price: Option<f64>,
  pub export_at: Option<DateTime<Utc>>,
  pub created_at: Option<DateTime<Utc>>,
}

impl ImportView {
  pub fn from_document(doc: &Document) -> Self {
    ImportView {
      category: doc
        .get(fields::CATEGORY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string),
      user_quantity: doc.get(fields::USER_QUANTITY).and_then(as_i64_lenient),
      price: doc.get(fields::PRICE).and_then(as_f64_lenient),
      export_at: doc.get(fields::EXPORT_AT).and_then(parse_timestamp),
      created_at: doc.get(fields::CREATED_AT).and_then(parse_timestamp),
    }
  }

  /// `exportAt`, falling back to `createdAt`.
  pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
    self.export_at.or(self.created_at)
  }
}
