// trade_core/src/store/mod.rs

//! The persistence seam: a small document-store contract covering exactly
//! what the gateway needs (filter, sort, skip/limit, count, insert, partial
//! update, delete).

pub mod memory;

pub use memory::MemoryStore;

use crate::document::Document;
use crate::error::TradeResult;
use crate::filter::{Filter, SortKey};
use crate::ids::ObjectId;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Products,
  Imports,
}

impl Collection {
  pub const ALL: [Collection; 2] = [Collection::Products, Collection::Imports];

  pub fn name(&self) -> &'static str {
    match self {
      Collection::Products => "products",
      Collection::Imports => "imports",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone)]
pub struct FindOptions {
  pub filter: Filter,
  pub sort: Option<SortKey>,
  pub skip: u64,
  pub limit: Option<u64>,
}

impl FindOptions {
  pub fn new(filter: Filter) -> Self {
    FindOptions {
      filter,
      sort: None,
      skip: 0,
      limit: None,
    }
  }

  pub fn all() -> Self {
    Self::new(Filter::All)
  }

  pub fn sort(mut self, key: SortKey) -> Self {
    self.sort = Some(key);
    self
  }

  pub fn skip(mut self, skip: u64) -> Self {
    self.skip = skip;
    self
  }

  pub fn limit(mut self, limit: u64) -> Self {
    self.limit = Some(limit);
    self
  }
}

/// Partial update: `set` overwrites fields, `inc` adds to integer fields
/// (a missing field is created with the increment as its value).
#[derive(Debug, Clone, Default)]
pub struct Update {
  pub set: Document,
  pub inc: Vec<(String, i64)>,
}

impl Update {
  pub fn set(fields: Document) -> Self {
    Update {
      set: fields,
      inc: Vec::new(),
    }
  }

  pub fn inc(field: impl Into<String>, by: i64) -> Self {
    Update {
      set: Document::new(),
      inc: vec![(field.into(), by)],
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
  pub acknowledged: bool,
  pub inserted_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
  pub acknowledged: bool,
  pub matched_count: u64,
  pub modified_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
  pub acknowledged: bool,
  pub deleted_count: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  fn backend_name(&self) -> &'static str;

  async fn find(&self, collection: Collection, options: &FindOptions) -> TradeResult<Vec<Document>>;

  async fn find_one(&self, collection: Collection, filter: &Filter) -> TradeResult<Option<Document>> {
    let mut found = self
      .find(collection, &FindOptions::new(filter.clone()).limit(1))
      .await?;
    Ok(if found.is_empty() { None } else { Some(found.remove(0)) })
  }

  async fn count(&self, collection: Collection, filter: &Filter) -> TradeResult<u64>;

  /// Stores `doc` under a freshly generated identifier; any `_id` it carries is replaced.
  async fn insert_one(&self, collection: Collection, doc: Document) -> TradeResult<InsertResult>;

  /// Applies `update` to the first document matching `filter`, atomically per document.
  async fn update_one(&self, collection: Collection, filter: &Filter, update: &Update) -> TradeResult<UpdateResult>;

  async fn delete_one(&self, collection: Collection, filter: &Filter) -> TradeResult<DeleteResult>;

  async fn ping(&self) -> TradeResult<()> {
    Ok(())
  }

  /// Releases the underlying connection(s). Called once at shutdown.
  async fn close(&self) {}
}
