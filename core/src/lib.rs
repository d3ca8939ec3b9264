// trade_core/src/lib.rs

//! Domain library for the trade inventory gateway.
//!
//! - [`store`]: the `DocumentStore` seam and the in-memory implementation.
//! - [`filter`]: field equality / range / regex filters and sort keys.
//! - [`query`]: listing parameters to filter, sort and pagination.
//! - [`analytics`]: dashboard counts, category and monthly aggregation.
//! - [`imports`]: the import-and-decrement workflow.

pub mod analytics;
pub mod document;
pub mod error;
pub mod filter;
pub mod ids;
pub mod imports;
pub mod models;
pub mod query;
pub mod store;
pub mod timestamp;

pub use crate::document::{into_document, Document, ID_FIELD};
pub use crate::error::{TradeError, TradeResult};
pub use crate::filter::{Filter, SortDirection, SortKey};
pub use crate::ids::ObjectId;
pub use crate::imports::{record_import, ImportOutcome, ImportRequest, StockPolicy};
pub use crate::query::{list_products, ProductListParams, ProductPage, ProductQuery, ProductSort};
pub use crate::store::{
  Collection, DeleteResult, DocumentStore, FindOptions, InsertResult, MemoryStore, Update, UpdateResult,
};
