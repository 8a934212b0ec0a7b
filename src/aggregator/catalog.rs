//! Branch directory: parses the upstream branch catalog and narrows it down
//! to one city.

use crate::error::SearchError;
use crate::models::{Branch, City};
use crate::providers::RentalApi;
use anyhow::Context;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Fetch the catalog and return the branches of `city_slug`.
///
/// An empty list is not an error here; the service decides how to surface it.
pub async fn resolve_branches(api: &dyn RentalApi, city_slug: &str) -> Result<Vec<Branch>, SearchError> {
    let branches = fetch_all_branches(api).await?;
    let in_city = filter_by_city(branches, city_slug);
    info!("Found {} branches for city '{}'", in_city.len(), city_slug.trim());
    Ok(in_city)
}

/// Distinct cities present in the catalog, sorted by display name
pub async fn list_cities(api: &dyn RentalApi) -> Result<Vec<City>, SearchError> {
    let branches = fetch_all_branches(api).await?;
    Ok(cities_from_branches(&branches))
}

async fn fetch_all_branches(api: &dyn RentalApi) -> Result<Vec<Branch>, SearchError> {
    let body = api
        .fetch_branch_catalog()
        .await
        .with_context(|| format!("{} branch catalog unavailable", api.source_name()))
        .map_err(SearchError::Transport)?;

    parse_branches(&body).map_err(SearchError::Transport)
}

/// Parse every well-formed branch out of a catalog body.
///
/// Entries missing any of `citySlug`, `id`, `referenceId` or `name` are
/// skipped. Only a body that is not JSON at all is an error.
pub fn parse_branches(body: &str) -> anyhow::Result<Vec<Branch>> {
    let data: Value = serde_json::from_str(body).context("Branch catalog is not valid JSON")?;

    let entries = match &data {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(entries)) => entries,
            _ => {
                warn!("Branch catalog has no data array");
                return Ok(Vec::new());
            }
        },
        _ => {
            warn!("Branch catalog has unexpected shape");
            return Ok(Vec::new());
        }
    };

    let mut branches = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Some(branch) => branches.push(branch),
            None => debug!(index, "Skipping malformed branch entry"),
        }
    }

    debug!("Parsed {} of {} catalog entries", branches.len(), entries.len());
    Ok(branches)
}

fn parse_entry(entry: &Value) -> Option<Branch> {
    Some(Branch {
        branch_id: text_field(entry, "referenceId")?,
        location_id: text_field(entry, "id")?,
        name: text_field(entry, "name")?,
        city_slug: text_field(entry, "citySlug")?,
    })
}

/// Non-empty string or number field, as text
fn text_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Keep branches whose slug equals `city_slug`, ignoring case
pub fn filter_by_city(branches: Vec<Branch>, city_slug: &str) -> Vec<Branch> {
    let wanted = city_slug.trim().to_lowercase();
    branches
        .into_iter()
        .filter(|b| b.city_slug.to_lowercase() == wanted)
        .collect()
}

pub fn cities_from_branches(branches: &[Branch]) -> Vec<City> {
    let mut seen = HashSet::new();
    let mut cities: Vec<City> = branches
        .iter()
        .filter(|b| seen.insert(b.city_slug.to_lowercase()))
        .map(|b| City {
            slug: b.city_slug.clone(),
            name: title_case(&b.city_slug),
        })
        .collect();

    cities.sort_by(|a, b| a.name.cmp(&b.name));
    cities
}

fn title_case(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> String {
        json!({
            "data": [
                {"id": "loc-1", "referenceId": "ref-1", "name": "Kadıköy", "citySlug": "istanbul"},
                {"id": 42, "referenceId": "ref-2", "name": "Havalimanı", "citySlug": "Istanbul"},
                {"id": "loc-3", "referenceId": "ref-3", "name": "Kızılay", "citySlug": "ankara"},
                {"id": "loc-4", "name": "No reference", "citySlug": "istanbul"},
                {"id": "loc-5", "referenceId": "ref-5", "name": "", "citySlug": "istanbul"},
                "not an object"
            ]
        })
        .to_string()
    }

    #[test]
    fn skips_entries_missing_required_fields() {
        let branches = parse_branches(&catalog()).unwrap();
        let ids: Vec<_> = branches.iter().map(|b| b.branch_id.as_str()).collect();
        assert_eq!(ids, vec!["ref-1", "ref-2", "ref-3"]);
    }

    #[test]
    fn numeric_location_id_is_stringified() {
        let branches = parse_branches(&catalog()).unwrap();
        assert_eq!(branches[1].location_id, "42");
    }

    #[test]
    fn city_filter_ignores_case() {
        let branches = parse_branches(&catalog()).unwrap();
        let istanbul = filter_by_city(branches, " ISTANBUL ");
        assert_eq!(istanbul.len(), 2);
    }

    #[test]
    fn unknown_city_yields_empty_list() {
        let branches = parse_branches(&catalog()).unwrap();
        assert!(filter_by_city(branches, "izmir").is_empty());
    }

    #[test]
    fn bare_array_catalog_is_accepted() {
        let body = json!([{"id": "l", "referenceId": "r", "name": "n", "citySlug": "bursa"}]).to_string();
        assert_eq!(parse_branches(&body).unwrap().len(), 1);
    }

    #[test]
    fn missing_data_array_is_empty_not_error() {
        assert!(parse_branches(r#"{"success": true}"#).unwrap().is_empty());
    }

    #[test]
    fn non_json_catalog_is_error() {
        assert!(parse_branches("<html>gateway timeout</html>").is_err());
    }

    #[test]
    fn cities_are_distinct_and_sorted() {
        let branches = parse_branches(&catalog()).unwrap();
        let cities = cities_from_branches(&branches);
        assert_eq!(
            cities,
            vec![
                City { slug: "ankara".into(), name: "Ankara".into() },
                City { slug: "istanbul".into(), name: "Istanbul".into() },
            ]
        );
    }
}
