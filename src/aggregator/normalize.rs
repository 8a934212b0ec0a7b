//! Maps one upstream per-branch search response into uniform
//! [`VehicleRecord`]s.
//!
//! Upstream codes are translated through small fixed tables. Any code that is
//! not in a table becomes [`UNKNOWN`]; normalization never fails, it only
//! yields fewer records.

use crate::models::{Branch, VehicleRecord, CURRENCY};
use serde_json::Value;
use tracing::{debug, warn};

pub const UNKNOWN: &str = "Bilinmiyor";
const MISSING_TEXT: &str = "N/A";
const SNIPPET_CHARS: usize = 500;

pub const FUEL_TYPES: &[(i64, &str)] = &[(1, "Benzin"), (2, "Dizel"), (3, "Elektrik"), (4, "Hybrid")];

pub const TRANSMISSION_TYPES: &[(i64, &str)] = &[(1, "Otomatik"), (2, "Otomatik"), (3, "Manuel")];

pub const SEGMENTS: &[(i64, &str)] = &[(1, "Ekonomi"), (2, "Konfor"), (3, "Lüks"), (4, "Prestij")];

/// Translate an upstream code through `table`, defaulting to [`UNKNOWN`]
pub fn lookup(table: &[(i64, &'static str)], code: Option<&Value>) -> &'static str {
    code.and_then(as_code)
        .and_then(|code| table.iter().find(|(c, _)| *c == code))
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN)
}

fn as_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite numeric price; `"NaN"` and `"inf"` strings count as missing
fn as_price(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|p| p.is_finite())
}

/// Upstream display text, carried verbatim. Non-string values count as missing.
fn as_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => MISSING_TEXT.to_string(),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}

/// Normalize every vehicle in `body`, stamping provenance from `branch`
pub fn normalize(body: &str, branch: &Branch) -> Vec<VehicleRecord> {
    normalize_capped(body, branch, None)
}

/// Like [`normalize`], but only looks at the first `cap` upstream entries
pub fn normalize_capped(body: &str, branch: &Branch, cap: Option<usize>) -> Vec<VehicleRecord> {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            warn!(
                branch = %branch.name,
                error = %e,
                "Search response is not JSON: {}",
                snippet(body)
            );
            return Vec::new();
        }
    };

    let Some(entries) = data.pointer("/data/vehicles").and_then(Value::as_array) else {
        if data.get("success") == Some(&Value::Bool(false)) {
            if let Some(message) = data.pointer("/error/message").and_then(Value::as_str) {
                warn!(branch = %branch.name, "Upstream reported error: {}", message);
                return Vec::new();
            }
        }
        warn!(
            branch = %branch.name,
            "No data.vehicles in search response: {}",
            snippet(body)
        );
        return Vec::new();
    };

    let limit = cap.unwrap_or(entries.len());
    let records: Vec<VehicleRecord> = entries
        .iter()
        .take(limit)
        .filter_map(|entry| normalize_entry(entry, branch))
        .collect();

    debug!(
        branch = %branch.name,
        "Normalized {} of {} vehicles",
        records.len(),
        entries.len()
    );
    records
}

fn normalize_entry(entry: &Value, branch: &Branch) -> Option<VehicleRecord> {
    let info = entry.get("vehicleInfo").filter(|v| v.is_object())?;
    let price = entry.get("priceInfo").filter(|v| v.is_object())?;

    Some(VehicleRecord {
        brand_model: as_text(info.get("vehicleDescription")),
        fuel: lookup(FUEL_TYPES, info.get("fuelType")).to_string(),
        gear: lookup(TRANSMISSION_TYPES, info.get("transmissionType")).to_string(),
        segment_name: lookup(SEGMENTS, info.get("segment")).to_string(),
        price_pay_now: as_price(price.get("discountedPrice")),
        price_pay_now_str: as_text(price.get("discountedPriceStr")),
        price_pay_office: as_price(price.get("netPrice")),
        price_pay_office_str: as_text(price.get("netPriceStr")),
        daily_price: as_price(price.get("dailyPrice")),
        daily_price_str: as_text(price.get("dailyPriceStr")),
        currency: CURRENCY.to_string(),
        image: info.get("image").and_then(Value::as_str).map(str::to_string),
        branch_id: branch.branch_id.clone(),
        location_id: branch.location_id.clone(),
        branch_name: branch.name.clone(),
        city_slug: branch.city_slug.clone(),
    })
}
