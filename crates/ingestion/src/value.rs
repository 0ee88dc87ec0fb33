//! Lenient coercions from raw JSON fields.
//!
//! Exports written by different wallet versions disagree on whether ids and
//! timestamps are numbers or strings. These helpers accept either and return
//! `None` for anything else.

use serde_json::Value;
use statelog_core::TimestampMs;

/// String or number as an owned string. Empty strings count as absent.
pub fn as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric or numeric-string timestamp in milliseconds.
pub fn as_timestamp(value: Option<&Value>) -> Option<TimestampMs> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Timestamp that also treats `0` as absent, matching the exports' own
/// "unset" convention for approval dates.
pub fn as_nonzero_timestamp(value: Option<&Value>) -> Option<TimestampMs> {
    as_timestamp(value).filter(|ts| *ts != 0)
}

/// Field `key` of `value` as text.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    as_text(value.get(key))
}

/// First of `keys` present on `value` as text.
pub fn first_text_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(value, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(as_text(Some(&json!(17))), Some("17".to_string()));
        assert_eq!(as_text(Some(&json!(""))), None);
        assert_eq!(as_text(Some(&json!(true))), None);
        assert_eq!(as_text(Some(&json!({"a": 1}))), None);
        assert_eq!(as_text(None), None);
    }

    #[test]
    fn test_as_timestamp() {
        assert_eq!(as_timestamp(Some(&json!(1000))), Some(1000));
        assert_eq!(as_timestamp(Some(&json!(1000.9))), Some(1000));
        assert_eq!(as_timestamp(Some(&json!("1700000000000"))), Some(1_700_000_000_000));
        assert_eq!(as_timestamp(Some(&json!("soon"))), None);
        assert_eq!(as_nonzero_timestamp(Some(&json!(0))), None);
    }

    #[test]
    fn test_first_text_field() {
        let value = json!({"b": "second", "c": "third"});
        assert_eq!(first_text_field(&value, &["a", "b", "c"]), Some("second".to_string()));
        assert_eq!(first_text_field(&value, &["x"]), None);
    }
}
