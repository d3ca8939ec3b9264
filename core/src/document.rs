// trade_core/src/document.rs

//! Schema-less documents and the value helpers shared by filters, sorting
//! and aggregation.

use crate::error::{TradeError, TradeResult};
use crate::ids::ObjectId;
use serde_json::Value;
use std::cmp::Ordering;

pub type Document = serde_json::Map<String, Value>;

pub const ID_FIELD: &str = "_id";

/// Converts a request body into a document, rejecting anything but a JSON object.
pub fn into_document(value: Value) -> TradeResult<Document> {
  match value {
    Value::Object(map) => Ok(map),
    other => Err(TradeError::InvalidDocument {
      message: format!("expected a JSON object, got {}", type_name(&other)),
    }),
  }
}

pub fn with_id(mut doc: Document, id: ObjectId) -> Document {
  doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
  doc
}

pub fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Numbers and numeric strings. Anything else is `None`.
pub fn as_f64_lenient(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
    _ => None,
  }
}

/// Integral numbers and integral numeric strings ("5", "5.0"). Fractions are `None`.
pub fn as_i64_lenient(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
    Value::String(s) => {
      let trimmed = s.trim();
      trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
    }
    _ => None,
  }
}

fn integral_f64(f: f64) -> Option<i64> {
  if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
    Some(f as i64)
  } else {
    None
  }
}

// Same cross-type order as PostgreSQL jsonb, with a missing field below
// everything: missing < null < string < number < boolean < array < object.
fn type_rank(value: Option<&Value>) -> u8 {
  match value {
    None => 0,
    Some(Value::Null) => 1,
    Some(Value::String(_)) => 2,
    Some(Value::Number(_)) => 3,
    Some(Value::Bool(_)) => 4,
    Some(Value::Array(_)) => 5,
    Some(Value::Object(_)) => 6,
  }
}

/// Total order over optional field values, used for sorting documents.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
  let rank = type_rank(a).cmp(&type_rank(b));
  if rank != Ordering::Equal {
    return rank;
  }
  match (a, b) {
    (Some(Value::Number(x)), Some(Value::Number(y))) => {
      let x = x.as_f64().unwrap_or(0.0);
      let y = y.as_f64().unwrap_or(0.0);
      x.total_cmp(&y)
    }
    (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
    (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
    (Some(x @ Value::Object(_)), Some(y @ Value::Object(_)))
    | (Some(x @ Value::Array(_)), Some(y @ Value::Array(_))) => x.to_string().cmp(&y.to_string()),
    _ => Ordering::Equal,
  }
}
