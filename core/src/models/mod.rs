// trade_core/src/models/mod.rs

//! Field names and lenient typed views over stored documents.
//!
//! Documents are schema-less, so views never fail: absent or mistyped fields
//! read as `None`.

pub mod import_record;
pub mod product;

pub use import_record::ImportView;
pub use product::ProductView;
