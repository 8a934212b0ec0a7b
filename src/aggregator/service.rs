use crate::aggregator::{catalog, orchestrator, postprocess};
use crate::config::SearchConfig;
use crate::dates;
use crate::error::SearchError;
use crate::models::{City, SearchOutcome};
use crate::providers::{RentalApi, SearchRequest};
use std::sync::Arc;
use tracing::info;

/// City used when the caller does not name one
pub const DEFAULT_CITY: &str = "istanbul";

/// The one aggregation entrypoint shared by the HTTP server and the CLI
#[derive(Clone)]
pub struct RentalService {
    api: Arc<dyn RentalApi>,
    config: SearchConfig,
}

impl RentalService {
    pub fn new(api: Arc<dyn RentalApi>, config: SearchConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search every branch of `city_slug` and return bookable vehicles,
    /// cheapest first.
    ///
    /// Only bad input, an unknown city or an unreachable branch catalog fail
    /// the call. Branch-level failures just shrink the result.
    pub async fn get_available_vehicles(
        &self,
        city_slug: &str,
        pickup_date: &str,
        dropoff_date: &str,
    ) -> Result<SearchOutcome, SearchError> {
        let request = build_request(city_slug, pickup_date, dropoff_date)?;

        info!(
            "Searching {} from {} to {} via {}",
            request.city_slug,
            request.pickup_date,
            request.dropoff_date,
            self.api.source_name()
        );

        let branches = catalog::resolve_branches(self.api.as_ref(), &request.city_slug).await?;
        if branches.is_empty() {
            return Err(SearchError::NotFound {
                city_slug: request.city_slug,
            });
        }

        let sweep = orchestrator::sweep(self.api.as_ref(), &branches, &request, &self.config).await;
        let vehicles = postprocess::finalize(sweep.vehicles);

        Ok(SearchOutcome {
            vehicles,
            branches_searched: sweep.succeeded,
            branches_total: branches.len(),
            parallel_search: sweep.parallel,
        })
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, SearchError> {
        catalog::list_cities(self.api.as_ref()).await
    }
}

/// Validate the raw inputs and bring dates into the upstream format
pub fn build_request(
    city_slug: &str,
    pickup_date: &str,
    dropoff_date: &str,
) -> Result<SearchRequest, SearchError> {
    if pickup_date.trim().is_empty() || dropoff_date.trim().is_empty() {
        return Err(SearchError::validation(
            "Both pickupDate and dropoffDate parameters are required",
        ));
    }

    let pickup = dates::to_upstream_format(pickup_date)
        .ok_or_else(|| SearchError::validation(format!("Unrecognised pickupDate: {pickup_date}")))?;
    let dropoff = dates::to_upstream_format(dropoff_date)
        .ok_or_else(|| SearchError::validation(format!("Unrecognised dropoffDate: {dropoff_date}")))?;

    let city = city_slug.trim().to_lowercase();
    let city_slug = if city.is_empty() { DEFAULT_CITY.to_string() } else { city };

    Ok(SearchRequest {
        city_slug,
        pickup_date: pickup,
        dropoff_date: dropoff,
    })
}
