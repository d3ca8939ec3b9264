// trade_core/src/store/memory.rs

use super::{Collection, DeleteResult, DocumentStore, FindOptions, InsertResult, Update, UpdateResult};
use crate::document::{with_id, Document, ID_FIELD};
use crate::error::{TradeError, TradeResult};
use crate::filter::Filter;
use crate::ids::ObjectId;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// In-process document store. Documents keep insertion order, which is the
/// natural order returned by unsorted finds.
#[derive(Debug, Default)]
pub struct MemoryStore {
  collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self, collection: Collection) -> usize {
    self.collections.read().get(&collection).map_or(0, Vec::len)
  }

  pub fn is_empty(&self, collection: Collection) -> bool {
    self.len(collection) == 0
  }
}

fn apply_update(collection: Collection, doc: &mut Document, update: &Update) -> TradeResult<bool> {
  // Validate every increment before touching the document.
  let mut increments = Vec::with_capacity(update.inc.len());
  for (field, by) in &update.inc {
    let next = match doc.get(field) {
      None | Some(Value::Null) => Value::from(*by),
      Some(Value::Number(n)) => match n.as_i64() {
        Some(current) => Value::from(current.saturating_add(*by)),
        None => {
          let current = n.as_f64().unwrap_or(0.0);
          Number::from_f64(current + *by as f64).map_or(Value::Null, Value::Number)
        }
      },
      Some(_) => {
        return Err(TradeError::NonNumericField {
          collection: collection.name().to_string(),
          field: field.clone(),
        })
      }
    };
    increments.push((field.clone(), next));
  }

  let mut modified = false;
  for (field, value) in update.set.iter().filter(|(k, _)| k.as_str() != ID_FIELD) {
    if doc.get(field) != Some(value) {
      doc.insert(field.clone(), value.clone());
      modified = true;
    }
  }
  for (field, value) in increments {
    if doc.get(&field) != Some(&value) {
      doc.insert(field, value);
      modified = true;
    }
  }
  Ok(modified)
}

#[async_trait]
impl DocumentStore for MemoryStore {
  fn backend_name(&self) -> &'static str {
    "memory"
  }

  #[instrument(name = "memory_store::find", skip(self, options), fields(collection = %collection))]
  async fn find(&self, collection: Collection, options: &FindOptions) -> TradeResult<Vec<Document>> {
    let guard = self.collections.read();
    let mut matched: Vec<Document> = guard
      .get(&collection)
      .map(|docs| docs.iter().filter(|d| options.filter.matches(d)).cloned().collect())
      .unwrap_or_default();
    drop(guard);

    if let Some(key) = &options.sort {
      // Stable, so ties keep insertion order.
      matched.sort_by(|a, b| key.compare(a, b));
    }

    let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
    let limit = options
      .limit
      .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
    let page: Vec<Document> = matched.into_iter().skip(skip).take(limit).collect();
    debug!(returned = page.len(), "memory find complete");
    Ok(page)
  }

  async fn count(&self, collection: Collection, filter: &Filter) -> TradeResult<u64> {
    let guard = self.collections.read();
    let count = guard
      .get(&collection)
      .map_or(0, |docs| docs.iter().filter(|d| filter.matches(d)).count());
    Ok(count as u64)
  }

  #[instrument(name = "memory_store::insert_one", skip(self, doc), fields(collection = %collection))]
  async fn insert_one(&self, collection: Collection, doc: Document) -> TradeResult<InsertResult> {
    let id = ObjectId::new();
    self
      .collections
      .write()
      .entry(collection)
      .or_default()
      .push(with_id(doc, id));
    debug!(inserted_id = %id, "document inserted");
    Ok(InsertResult {
      acknowledged: true,
      inserted_id: id,
    })
  }

  #[instrument(name = "memory_store::update_one", skip(self, filter, update), fields(collection = %collection))]
  async fn update_one(&self, collection: Collection, filter: &Filter, update: &Update) -> TradeResult<UpdateResult> {
    let mut guard = self.collections.write();
    let target = guard
      .get_mut(&collection)
      .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)));

    let Some(doc) = target else {
      return Ok(UpdateResult {
        acknowledged: true,
        matched_count: 0,
        modified_count: 0,
      });
    };

    let modified = apply_update(collection, doc, update)?;
    Ok(UpdateResult {
      acknowledged: true,
      matched_count: 1,
      modified_count: u64::from(modified),
    })
  }

  #[instrument(name = "memory_store::delete_one", skip(self, filter), fields(collection = %collection))]
  async fn delete_one(&self, collection: Collection, filter: &Filter) -> TradeResult<DeleteResult> {
    let mut guard = self.collections.write();
    let deleted = match guard.get_mut(&collection) {
      Some(docs) => match docs.iter().position(|d| filter.matches(d)) {
        Some(index) => {
          docs.remove(index);
          1
        }
        None => 0,
      },
      None => 0,
    };
    Ok(DeleteResult {
      acknowledged: true,
      deleted_count: deleted,
    })
  }
}
