// trade_core/src/imports.rs

//! Recording an import: validate the request, decrement the product's
//! `availableQuantity`, store the import record.

use crate::document::{as_i64_lenient, into_document, Document, ID_FIELD};
use crate::error::{TradeError, TradeResult};
use crate::filter::Filter;
use crate::ids::ObjectId;
use crate::models::import_record::fields;
use crate::models::product::fields as product_fields;
use crate::models::ProductView;
use crate::store::{Collection, DocumentStore, InsertResult, Update, UpdateResult};
use crate::timestamp::now_rfc3339;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

/// How the product decrement relates to the stock on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
  /// Decrement only when `availableQuantity >= userQuantity`, before the
  /// import is written. A failed insert re-increments the product.
  #[default]
  Guarded,
  /// Insert, then decrement unconditionally. Quantity may go negative and a
  /// failure in either write leaves the other in place.
  Unchecked,
}

#[derive(Debug, Clone)]
pub struct ImportRequest {
  pub product_id: ObjectId,
  pub quantity: i64,
  pub body: Document,
}

pub fn parse_user_quantity(value: Option<&Value>) -> TradeResult<i64> {
  match value.and_then(as_i64_lenient) {
    Some(quantity) if quantity > 0 => Ok(quantity),
    _ => Err(TradeError::InvalidQuantity {
      value: value.map_or_else(|| "missing".to_string(), Value::to_string),
    }),
  }
}

impl ImportRequest {
  /// Validates the body up front so a rejected request writes nothing.
  /// The identifier is parsed by the caller, before the body is read.
  pub fn new(product_id: ObjectId, body: Value) -> TradeResult<Self> {
    let body = into_document(body)?;
    let quantity = parse_user_quantity(body.get(fields::USER_QUANTITY))?;
    Ok(ImportRequest {
      product_id,
      quantity,
      body,
    })
  }

  fn into_record(self, product: Option<&ProductView>) -> Document {
    let mut record = self.body;
    record.remove(ID_FIELD);
    record.insert(fields::PRODUCT_ID.into(), Value::String(self.product_id.to_hex()));
    record.insert(fields::USER_QUANTITY.into(), Value::from(self.quantity));
    if !record.contains_key(fields::CREATED_AT) {
      record.insert(fields::CREATED_AT.into(), Value::String(now_rfc3339()));
    }

    // Imports carry a copy of the product's descriptive fields at import time.
    if let Some(product) = product {
      let copies = [
        (fields::CATEGORY, product.category.clone().map(Value::String)),
        (fields::PRODUCT_NAME, product.product_name.clone().map(Value::String)),
        (fields::PRICE, product.price.and_then(serde_json::Number::from_f64).map(Value::Number)),
      ];
      for (field, value) in copies {
        if record.contains_key(field) {
          continue;
        }
        if let Some(value) = value {
          record.insert(field.into(), value);
        }
      }
    }
    record
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
  pub result: InsertResult,
  pub remain_quantity: UpdateResult,
  /// Product quantity read back after the decrement.
  pub available_quantity: Option<i64>,
}

/// Both writes are committed by the time this runs, so a failed read is
/// reported as an unknown quantity rather than an error.
async fn read_available(store: &dyn DocumentStore, id: ObjectId) -> Option<i64> {
  match store.find_one(Collection::Products, &Filter::id(id)).await {
    Ok(product) => product.and_then(|doc| ProductView::from_document(&doc).available_quantity),
    Err(e) => {
      warn!(error = %e, "import recorded but the product quantity could not be read back");
      None
    }
  }
}

#[instrument(
  name = "imports::record_import",
  skip(store, request),
  fields(product_id = %request.product_id, quantity = request.quantity, policy = ?policy)
)]
pub async fn record_import(
  store: &dyn DocumentStore,
  request: ImportRequest,
  policy: StockPolicy,
) -> TradeResult<ImportOutcome> {
  match policy {
    StockPolicy::Guarded => record_guarded(store, request).await,
    StockPolicy::Unchecked => record_unchecked(store, request).await,
  }
}

async fn record_guarded(store: &dyn DocumentStore, request: ImportRequest) -> TradeResult<ImportOutcome> {
  let id = request.product_id;
  let quantity = request.quantity;

  let product_doc = store
    .find_one(Collection::Products, &Filter::id(id))
    .await?
    .ok_or_else(|| TradeError::ProductNotFound { id: id.to_hex() })?;
  // The guard compares JSON numbers only; anything else must not read as "out of stock".
  if matches!(product_doc.get(product_fields::AVAILABLE_QUANTITY), Some(v) if !v.is_number()) {
    warn!("import rejected: stored availableQuantity is not a number");
    return Err(TradeError::NonNumericField {
      collection: Collection::Products.name().to_string(),
      field: product_fields::AVAILABLE_QUANTITY.to_string(),
    });
  }
  let product = ProductView::from_document(&product_doc);

  let guard = Filter::and(vec![
    Filter::id(id),
    Filter::gte(product_fields::AVAILABLE_QUANTITY, quantity as f64),
  ]);
  let remain_quantity = store
    .update_one(
      Collection::Products,
      &guard,
      &Update::inc(product_fields::AVAILABLE_QUANTITY, -quantity),
    )
    .await?;

  if remain_quantity.matched_count == 0 {
    let available = product.available_quantity.unwrap_or(0);
    warn!(available, "import rejected: insufficient stock");
    return Err(TradeError::InsufficientStock {
      id: id.to_hex(),
      requested: quantity,
      available,
    });
  }

  let record = request.into_record(Some(&product));
  let result = match store.insert_one(Collection::Imports, record).await {
    Ok(result) => result,
    Err(insert_err) => {
      error!(error = %insert_err, "import insert failed, restoring product quantity");
      let restore = Update::inc(product_fields::AVAILABLE_QUANTITY, quantity);
      if let Err(restore_err) = store.update_one(Collection::Products, &Filter::id(id), &restore).await {
        error!(error = %restore_err, "failed to restore product quantity after insert failure");
      }
      return Err(insert_err);
    }
  };

  let available_quantity = read_available(store, id).await;
  info!(inserted_id = %result.inserted_id, ?available_quantity, "import recorded");
  Ok(ImportOutcome {
    result,
    remain_quantity,
    available_quantity,
  })
}

async fn record_unchecked(store: &dyn DocumentStore, request: ImportRequest) -> TradeResult<ImportOutcome> {
  let id = request.product_id;
  let quantity = request.quantity;

  let product = store
    .find_one(Collection::Products, &Filter::id(id))
    .await?
    .map(|doc| ProductView::from_document(&doc));
  if product.is_none() {
    warn!("recording import against a product that does not exist");
  }

  let result = store
    .insert_one(Collection::Imports, request.into_record(product.as_ref()))
    .await?;
  let remain_quantity = store
    .update_one(
      Collection::Products,
      &Filter::id(id),
      &Update::inc(product_fields::AVAILABLE_QUANTITY, -quantity),
    )
    .await?;

  let available_quantity = read_available(store, id).await;
  info!(inserted_id = %result.inserted_id, ?available_quantity, "import recorded without stock check");
  Ok(ImportOutcome {
    result,
    remain_quantity,
    available_quantity,
  })
}
