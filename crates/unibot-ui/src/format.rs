//! Display formatting for sizes and timestamps.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Backend timestamps without an offset, e.g. `2026-01-01T10:00:00.123456`
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with up to two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Size of a picked file, always in MB with two decimals.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `HH:MM` in local time; empty for unparseable input.
pub fn format_time(timestamp: &str) -> String {
    parse_local(timestamp)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// `Mar 1, 2026 10:00` in local time; falls back to the raw string.
pub fn format_date(timestamp: &str) -> String {
    parse_local(timestamp)
        .map(|t| t.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// RFC 3339 is converted to local time; offset-less values are taken as local.
fn parse_local(timestamp: &str) -> Option<DateTime<Local>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(t.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(timestamp, NAIVE_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// First eight characters of an identifier.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}
