//! Presentation formatters.
//!
//! Formatting never fails: malformed input falls back to `"0"` for amounts,
//! `"Unknown"` for addresses and dates, and `"Not available"` for settings.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;
use statelog_core::TimestampMs;
use statelog_ingestion::settings::{looks_like_date, MILLIS_THRESHOLD, SECONDS_THRESHOLD};
use std::fmt::Display;
use std::sync::OnceLock;
use tracing::warn;

/// Wei per ether.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const WEI_DECIMALS: usize = 18;

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "Not available";

/// Parse an integer wei amount, decimal or `0x` hex.
pub fn parse_wei(wei: &str) -> Option<u128> {
    let wei = wei.trim();
    if let Some(hex) = wei.strip_prefix("0x").or_else(|| wei.strip_prefix("0X")) {
        if hex.is_empty() {
            return None;
        }
        return u128::from_str_radix(hex, 16).ok();
    }
    if wei.is_empty() || !wei.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    wei.parse().ok()
}

/// Format wei as ether with at most `decimals` fractional digits.
/// Extra digits are truncated, not rounded; trailing zeros are dropped.
pub fn format_ether_with(wei: &str, decimals: usize) -> String {
    let Some(amount) = parse_wei(wei) else {
        warn!(wei, "malformed wei amount");
        return "0".to_string();
    };

    let whole = amount / WEI_PER_ETHER;
    let frac = format!("{:0width$}", amount % WEI_PER_ETHER, width = WEI_DECIMALS);
    let frac = frac[..decimals.min(WEI_DECIMALS)].trim_end_matches('0');

    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}

/// Format wei as ether with up to 6 fractional digits.
pub fn format_ether(wei: &str) -> String {
    format_ether_with(wei, 6)
}

/// Format an optional wei amount; absent amounts read as zero.
pub fn format_optional_ether(wei: Option<&str>, decimals: usize) -> String {
    wei.map_or_else(|| "0".to_string(), |w| format_ether_with(w, decimals))
}

/// Shorten long addresses and hashes to `first...last`.
pub fn truncate_address(address: Option<&str>, length: usize) -> String {
    let Some(address) = address.filter(|a| !a.is_empty()) else {
        return UNKNOWN.to_string();
    };
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= length * 2 + 2 {
        return address.to_string();
    }
    let head: String = chars[..length].iter().collect();
    let tail: String = chars[chars.len() - length..].iter().collect();
    format!("{head}...{tail}")
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid address regex"))
}

/// Whether `value` is a `0x`-prefixed 20-byte hex address.
pub fn is_ethereum_address(value: &str) -> bool {
    address_re().is_match(value)
}

fn format_datetime<Tz: TimeZone>(dt: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Format a millisecond timestamp in UTC. Zero and absent read as unknown.
pub fn format_timestamp(ts_ms: Option<TimestampMs>) -> String {
    match ts_ms.filter(|ts| *ts != 0).and_then(|ts| Utc.timestamp_millis_opt(ts).single()) {
        Some(dt) => format_datetime(dt),
        None => UNKNOWN.to_string(),
    }
}

/// Format a millisecond timestamp in the local timezone.
pub fn format_timestamp_local(ts_ms: Option<TimestampMs>) -> String {
    match ts_ms.filter(|ts| *ts != 0).and_then(|ts| Local.timestamp_millis_opt(ts).single()) {
        Some(dt) => format_datetime(dt),
        None => UNKNOWN.to_string(),
    }
}

/// Format a timestamp in UTC or local time.
pub fn format_time(ts_ms: Option<TimestampMs>, local: bool) -> String {
    if local {
        format_timestamp_local(ts_ms)
    } else {
        format_timestamp(ts_ms)
    }
}

/// Parse the date strings found in state logs into milliseconds.
pub fn parse_date_string(s: &str) -> Option<TimestampMs> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    None
}

/// Render a setting value for display.
///
/// Large numbers are read as timestamps: above 10^12 as milliseconds, above
/// 10^9 as seconds.
pub fn format_setting_value(value: Option<&Value>, local: bool) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
        Some(Value::String(s)) => {
            if looks_like_date(s) {
                if let Some(ts) = parse_date_string(s) {
                    return format_time(Some(ts), local);
                }
            }
            s.clone()
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f > MILLIS_THRESHOLD => format_time(Some(f as i64), local),
            Some(f) if f > SECONDS_THRESHOLD => format_time(Some((f * 1000.0) as i64), local),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// How a transaction status should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Failure,
    Pending,
}

/// Tone of a transaction status.
pub fn status_tone(status: Option<&str>) -> StatusTone {
    match status {
        Some("confirmed") => StatusTone::Success,
        Some("failed") => StatusTone::Failure,
        _ => StatusTone::Pending,
    }
}

/// Capitalised status, or unknown.
pub fn format_status(status: Option<&str>) -> String {
    let Some(status) = status.filter(|s| !s.is_empty()) else {
        return UNKNOWN.to_string();
    };
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether("1500000000000000000"), "1.5");
        assert_eq!(format_ether("1000000000000000000"), "1");
        assert_eq!(format_ether("0"), "0");
        assert_eq!(format_ether("123456789012345678901"), "123.456789");
        assert_eq!(format_ether("1"), "0");
        assert_eq!(format_ether("1000000000000"), "0.000001");
    }

    #[test]
    fn test_format_ether_malformed() {
        assert_eq!(format_ether("not-a-number"), "0");
        assert_eq!(format_ether(""), "0");
        assert_eq!(format_ether("-5"), "0");
        assert_eq!(format_ether("1.5"), "0");
        assert_eq!(format_ether("0x"), "0");
        assert_eq!(format_optional_ether(None, 6), "0");
    }

    #[test]
    fn test_format_ether_hex() {
        assert_eq!(format_ether("0xde0b6b3a7640000"), "1");
        assert_eq!(format_ether("0x14d1120d7b160000"), "1.5");
    }

    #[test]
    fn test_format_ether_custom_decimals() {
        assert_eq!(format_ether_with("1234567890000000000", 2), "1.23");
        assert_eq!(format_ether_with("1234567890000000000", 0), "1");
    }

    #[test]
    fn test_truncate_address() {
        let address = "0x1234567890abcdef1234567890abcdef12345678";
        assert_eq!(address.len(), 42);
        assert_eq!(truncate_address(Some(address), 6), "0x1234...345678");
        assert_eq!(truncate_address(Some("0x123456789012"), 6), "0x123456789012");
        assert_eq!(truncate_address(Some("0x1234567890123"), 6), "0x1234...890123");
        assert_eq!(truncate_address(None, 6), "Unknown");
        assert_eq!(truncate_address(Some(""), 6), "Unknown");
    }

    #[test]
    fn test_is_ethereum_address() {
        assert!(is_ethereum_address("0x1234567890abcdef1234567890ABCDEF12345678"));
        assert!(!is_ethereum_address("0x1234"));
        assert!(!is_ethereum_address("1234567890abcdef1234567890abcdef1234567890"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "Unknown");
        assert_eq!(format_timestamp(Some(0)), "Unknown");
        // 2024-01-05 15:04:00 UTC
        assert_eq!(format_timestamp(Some(1_704_467_040_000)), "Jan 5, 2024, 3:04 PM");
    }

    #[test]
    fn test_format_setting_value() {
        assert_eq!(format_setting_value(None, false), "Not available");
        assert_eq!(format_setting_value(Some(&json!(null)), false), "Not available");
        assert_eq!(format_setting_value(Some(&json!(true)), false), "Yes");
        assert_eq!(format_setting_value(Some(&json!(false)), false), "No");
        assert_eq!(format_setting_value(Some(&json!(42)), false), "42");
        assert_eq!(format_setting_value(Some(&json!("12.3.0")), false), "12.3.0");
        assert_eq!(
            format_setting_value(Some(&json!(1_704_467_040_000u64)), false),
            "Jan 5, 2024, 3:04 PM"
        );
        assert_eq!(
            format_setting_value(Some(&json!(1_704_467_040u64)), false),
            "Jan 5, 2024, 3:04 PM"
        );
        assert_eq!(
            format_setting_value(Some(&json!("2024-01-05T15:04:00Z")), false),
            "Jan 5, 2024, 3:04 PM"
        );
        assert_eq!(format_setting_value(Some(&json!({"a": 1})), false), r#"{"a":1}"#);
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(Some("confirmed")), "Confirmed");
        assert_eq!(format_status(None), "Unknown");
        assert_eq!(status_tone(Some("failed")), StatusTone::Failure);
        assert_eq!(status_tone(Some("submitted")), StatusTone::Pending);
    }
}
