//! Cell formatting rules shared by the collection and single-record tables.

use super::value::DisplayValue;
use chrono::{DateTime, TimeZone, Utc};

/// Fixed, locale-independent timestamp pattern.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Integers in this range are taken to be Unix epoch seconds (2001-09-09 .. 2033-05-18).
const EPOCH_SECONDS_MIN: i64 = 1_000_000_000;
const EPOCH_SECONDS_MAX: i64 = 2_000_000_000;

/// Number of sequence elements shown before the `...` marker.
const LIST_PREVIEW_LEN: usize = 3;

/// Formatted values hidden from single-record tables.
const SUPPRESSED: [&str; 3] = ["", "0", "<nil>"];

/// Format one value for a table cell.
pub fn format_cell(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Null => String::new(),
        DisplayValue::Bool(true) => "Yes".to_string(),
        DisplayValue::Bool(false) => "No".to_string(),
        DisplayValue::Int(n) => match epoch_timestamp(*n) {
            Some(ts) => format_timestamp(&ts),
            None => n.to_string(),
        },
        DisplayValue::Float(f) => f.to_string(),
        DisplayValue::Text(s) => s.clone(),
        DisplayValue::Timestamp(Some(ts)) => format_timestamp(ts),
        DisplayValue::Timestamp(None) => String::new(),
        DisplayValue::List(items) => format_list(items),
        DisplayValue::Map(entries) => format!("({} items)", entries.len()),
        DisplayValue::Record(record) => format!("({} fields)", record.len()),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Reinterpret an integer as epoch seconds when it falls in the plausible range.
pub fn epoch_timestamp(n: i64) -> Option<DateTime<Utc>> {
    if (EPOCH_SECONDS_MIN..=EPOCH_SECONDS_MAX).contains(&n) {
        Utc.timestamp_opt(n, 0).single()
    } else {
        None
    }
}

fn format_list(items: &[DisplayValue]) -> String {
    let mut out = items
        .iter()
        .take(LIST_PREVIEW_LEN)
        .map(format_cell)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > LIST_PREVIEW_LEN {
        out.push_str("...");
    }
    out
}

/// Whether a formatted value is dropped from a single-record table.
pub fn is_suppressed(formatted: &str) -> bool {
    SUPPRESSED.contains(&formatted)
}

/// Convert a camelCase or snake_case identifier to UPPER_SNAKE_CASE.
pub fn header_name(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}
