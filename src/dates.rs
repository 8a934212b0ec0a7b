//! Normalization of caller-supplied dates into the upstream's
//! `DD.MM.YYYY HH:MM` format.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const UPSTREAM_FORMAT: &str = "%d.%m.%Y %H:%M";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    UPSTREAM_FORMAT,
];

/// Parse a browser or CLI supplied date and render it in the upstream format.
///
/// RFC 3339 timestamps keep their local wall-clock time; a bare
/// `YYYY-MM-DD` means midnight. Returns `None` for anything else.
pub fn to_upstream_format(raw: &str) -> Option<String> {
    parse(raw.trim()).map(|dt| dt.format(UPSTREAM_FORMAT).to_string())
}

fn parse(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
