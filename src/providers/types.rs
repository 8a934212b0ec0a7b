use crate::models::Branch;
use serde::{Deserialize, Serialize};

/// Search parameters for one city-wide availability query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// City to search in
    pub city_slug: String,
    /// Pickup time as `DD.MM.YYYY HH:MM`
    pub pickup_date: String,
    /// Dropoff time as `DD.MM.YYYY HH:MM`
    pub dropoff_date: String,
}

/// Body of the upstream `Search` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub branch_id: String,
    pub location_id: String,
    pub arrival_branch_id: String,
    pub arrival_location_id: String,
    pub month: Option<String>,
    pub rent_id: Option<String>,
    pub coupon_code: Option<String>,
    pub collaboration_id: Option<String>,
    pub collaboration_reference_id: Option<String>,
    pub pickup_date: String,
    pub dropoff_date: String,
}

impl SearchPayload {
    /// Build a same-branch return search for `branch`
    pub fn for_branch(branch: &Branch, request: &SearchRequest) -> Self {
        Self {
            branch_id: branch.branch_id.clone(),
            location_id: branch.location_id.clone(),
            arrival_branch_id: branch.branch_id.clone(),
            arrival_location_id: branch.location_id.clone(),
            month: None,
            rent_id: None,
            coupon_code: None,
            collaboration_id: None,
            collaboration_reference_id: None,
            pickup_date: request.pickup_date.clone(),
            dropoff_date: request.dropoff_date.clone(),
        }
    }
}
