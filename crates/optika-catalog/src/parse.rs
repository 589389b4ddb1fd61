//! Scalar parsing helpers for loosely typed upstream fields.
//!
//! See [`crate::normalize`] for how they compose into full item
//! normalization. Every function here is total: unparseable input yields
//! `None` (or the documented default), never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::types::scalar_string;

/// Parses a price that may be a JSON number or a string such as `"89.90"`,
/// `"89,90"`, or `"€ 1.299,00"`.
///
/// Sign and magnitude are preserved; whether a price is usable is decided by
/// [`optika_core::CatalogItem::effective_price`].
#[must_use]
pub(crate) fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price_str(s),
        _ => None,
    }
}

fn parse_price_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // With both separators present, the last one is the decimal mark.
    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok()
}

/// Parses a creation timestamp into epoch milliseconds.
///
/// Numeric input (a JSON number or a numeric string) is taken as epoch
/// milliseconds. Otherwise RFC 3339, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, and `YYYY-MM-DD` are tried in turn. Anything else
/// yields `None`.
#[must_use]
pub(crate) fn parse_epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(truncate_millis)),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_millis(f: f64) -> i64 {
    f as i64
}

fn parse_date_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Resolves a title that may be a plain string or a per-locale object.
///
/// For objects, `locale` wins, then `"en"`, then the first non-empty value
/// in key order.
#[must_use]
pub(crate) fn resolve_title(value: &Value, locale: &str) -> Option<String> {
    match value {
        Value::Object(map) => map
            .get(locale)
            .and_then(scalar_string)
            .or_else(|| map.get("en").and_then(scalar_string))
            .or_else(|| map.values().find_map(scalar_string)),
        other => scalar_string(other),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
