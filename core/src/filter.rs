// trade_core/src/filter.rs

//! The filter and sort vocabulary understood by every `DocumentStore`.
//!
//! Filters operate on top-level document fields only. `MemoryStore` evaluates
//! them with [`Filter::matches`]; SQL backends compile the same tree.

use crate::document::{compare_values, Document, ID_FIELD};
use crate::error::TradeResult;
use crate::ids::ObjectId;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub enum Filter {
  /// Matches every document.
  All,
  /// Field equals value. A `null` value also matches a missing field.
  Eq { field: String, value: Value },
  /// Field is a number greater than or equal to `value`.
  Gte { field: String, value: f64 },
  /// Field is a string matched by `regex`.
  Regex {
    field: String,
    regex: Regex,
    case_insensitive: bool,
  },
  And(Vec<Filter>),
  Or(Vec<Filter>),
}

impl Filter {
  pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
    Filter::Eq {
      field: field.into(),
      value: value.into(),
    }
  }

  pub fn id(id: ObjectId) -> Self {
    Filter::eq(ID_FIELD, id.to_hex())
  }

  pub fn gte(field: impl Into<String>, value: f64) -> Self {
    Filter::Gte {
      field: field.into(),
      value,
    }
  }

  pub fn regex(field: impl Into<String>, pattern: &str, case_insensitive: bool) -> TradeResult<Self> {
    let regex = RegexBuilder::new(pattern).case_insensitive(case_insensitive).build()?;
    Ok(Filter::Regex {
      field: field.into(),
      regex,
      case_insensitive,
    })
  }

  /// Case-insensitive literal substring match; `needle` is escaped.
  pub fn contains_ignore_case(field: impl Into<String>, needle: &str) -> TradeResult<Self> {
    Filter::regex(field, &regex::escape(needle), true)
  }

  /// Conjunction that drops `All` members and collapses trivial cases.
  pub fn and(filters: Vec<Filter>) -> Self {
    let mut kept: Vec<Filter> = filters.into_iter().filter(|f| !matches!(f, Filter::All)).collect();
    match kept.len() {
      0 => Filter::All,
      1 => kept.remove(0),
      _ => Filter::And(kept),
    }
  }

  pub fn or(filters: Vec<Filter>) -> Self {
    if filters.len() == 1 {
      let mut filters = filters;
      return filters.remove(0);
    }
    Filter::Or(filters)
  }

  pub fn matches(&self, doc: &Document) -> bool {
    match self {
      Filter::All => true,
      Filter::Eq { field, value } => match doc.get(field) {
        Some(actual) => actual == value,
        None => value.is_null(),
      },
      Filter::Gte { field, value } => doc
        .get(field)
        .and_then(Value::as_f64)
        .map_or(false, |actual| actual >= *value),
      Filter::Regex { field, regex, .. } => doc
        .get(field)
        .and_then(Value::as_str)
        .map_or(false, |actual| regex.is_match(actual)),
      Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
      Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
  Ascending,
  Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
  pub field: String,
  pub direction: SortDirection,
}

impl SortKey {
  pub fn asc(field: impl Into<String>) -> Self {
    SortKey {
      field: field.into(),
      direction: SortDirection::Ascending,
    }
  }

  pub fn desc(field: impl Into<String>) -> Self {
    SortKey {
      field: field.into(),
      direction: SortDirection::Descending,
    }
  }

  pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
    let ordering = compare_values(a.get(&self.field), b.get(&self.field));
    match self.direction {
      SortDirection::Ascending => ordering,
      SortDirection::Descending => ordering.reverse(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::into_document;
  use serde_json::json;

  fn doc(value: Value) -> Document {
    into_document(value).unwrap()
  }

  #[test]
  fn eq_with_null_matches_missing_field() {
    let d = doc(json!({"a": 1}));
    assert!(Filter::eq("b", Value::Null).matches(&d));
    assert!(!Filter::eq("a", Value::Null).matches(&d));
    assert!(Filter::eq("a", 1).matches(&d));
  }

  #[test]
  fn gte_ignores_non_numbers() {
    assert!(Filter::gte("rating", 4.0).matches(&doc(json!({"rating": 4.5}))));
    assert!(!Filter::gte("rating", 4.0).matches(&doc(json!({"rating": "4.5"}))));
    assert!(!Filter::gte("rating", 4.0).matches(&doc(json!({}))));
  }

  #[test]
  fn contains_ignore_case_is_literal() {
    let f = Filter::contains_ignore_case("productName", "c++ (pro)").unwrap();
    assert!(f.matches(&doc(json!({"productName": "Learning C++ (Pro) edition"}))));
    assert!(!f.matches(&doc(json!({"productName": "cpp pro"}))));
  }

  #[test]
  fn and_collapses() {
    assert!(matches!(Filter::and(vec![Filter::All, Filter::All]), Filter::All));
    assert!(matches!(Filter::and(vec![Filter::All, Filter::eq("a", 1)]), Filter::Eq { .. }));
  }

  #[test]
  fn descending_sort_puts_missing_last() {
    let key = SortKey::desc("exportAt");
    let with = doc(json!({"exportAt": "2024-05-01"}));
    let without = doc(json!({}));
    assert_eq!(key.compare(&with, &without), Ordering::Less);
  }
}
