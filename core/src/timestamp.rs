// trade_core/src/timestamp.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Reads RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC), plain
/// `YYYY-MM-DD` dates and integer epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
  match value {
    Value::String(raw) => parse_timestamp_str(raw.trim()),
    Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
    _ => None,
  }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

pub fn now_rfc3339() -> String {
  Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Datelike;
  use serde_json::json;

  #[test]
  fn accepts_the_supported_shapes() {
    assert_eq!(parse_timestamp(&json!("2024-03-15T10:00:00.000Z")).unwrap().month(), 3);
    assert_eq!(parse_timestamp(&json!("2024-03-15T10:00:00+05:00")).unwrap().day(), 15);
    assert_eq!(parse_timestamp(&json!("2024-07-01T08:30:00")).unwrap().month(), 7);
    assert_eq!(parse_timestamp(&json!("2024-11-02")).unwrap().month(), 11);
    assert_eq!(parse_timestamp(&json!(1_704_067_200_000i64)).unwrap().year(), 2024);
  }

  #[test]
  fn rejects_garbage() {
    assert!(parse_timestamp(&json!("yesterday")).is_none());
    assert!(parse_timestamp(&json!(null)).is_none());
    assert!(parse_timestamp(&json!({"date": 1})).is_none());
  }
}
