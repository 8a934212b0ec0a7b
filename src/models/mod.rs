use serde::{Deserialize, Serialize};

/// Currency every upstream price is quoted in
pub const CURRENCY: &str = "TRY";

/// A rentable pickup/dropoff location of the upstream provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Upstream `referenceId`
    pub branch_id: String,
    /// Upstream `id`
    pub location_id: String,
    pub name: String,
    pub city_slug: String,
}

/// A city that has at least one branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub slug: String,
    pub name: String,
}

/// Normalized vehicle offer from a single branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleRecord {
    pub brand_model: String,
    pub fuel: String,
    pub gear: String,
    pub segment_name: String,
    pub price_pay_now: Option<f64>,
    pub price_pay_now_str: String,
    pub price_pay_office: Option<f64>,
    pub price_pay_office_str: String,
    pub daily_price: Option<f64>,
    pub daily_price_str: String,
    pub currency: String,
    pub image: Option<String>,
    pub branch_id: String,
    pub location_id: String,
    pub branch_name: String,
    pub city_slug: String,
}

/// Result of one city-wide availability search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOutcome {
    /// Bookable vehicles, cheapest pay-now price first
    pub vehicles: Vec<VehicleRecord>,
    /// Branches whose search call came back with a usable response
    pub branches_searched: usize,
    /// Branches found for the city
    pub branches_total: usize,
    /// Whether branches inside a batch were searched concurrently
    pub parallel_search: bool,
}
