//! Parallel per-branch search.
//!
//! Branches are processed in fixed-size batches. Every branch of a batch is
//! searched concurrently and the whole batch is joined before the next one
//! starts, with a short pause in between to go easy on the upstream. A
//! failing branch only contributes nothing; it never aborts the sweep.

use crate::aggregator::normalize::normalize_capped;
use crate::config::SearchConfig;
use crate::models::{Branch, VehicleRecord};
use crate::providers::{RentalApi, SearchPayload, SearchRequest};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Everything collected from one sweep over a city's branches
#[derive(Debug, Default)]
pub struct BranchSweep {
    /// Normalized records in batch order, then branch order within a batch
    pub vehicles: Vec<VehicleRecord>,
    /// Branches that answered with a successful response
    pub succeeded: usize,
    /// Branches whose call failed outright
    pub failed: usize,
    pub batches: usize,
    /// Whether branches inside a batch were searched concurrently
    pub parallel: bool,
}

/// Search every branch and return the merged, unsorted records
pub async fn search(
    api: &dyn RentalApi,
    branches: &[Branch],
    request: &SearchRequest,
    config: &SearchConfig,
) -> Vec<VehicleRecord> {
    sweep(api, branches, request, config).await.vehicles
}

/// Search every branch, keeping per-branch success counters
pub async fn sweep(
    api: &dyn RentalApi,
    branches: &[Branch],
    request: &SearchRequest,
    config: &SearchConfig,
) -> BranchSweep {
    let batch_size = config.batch_size.max(1);
    let batch_count = branches.len().div_ceil(batch_size);
    let parallel = branches.len() > config.sequential_threshold;

    info!(
        "Processing {} branches in {} batches of {} ({})",
        branches.len(),
        batch_count,
        batch_size,
        if parallel { "parallel" } else { "sequential" }
    );

    let mut result = BranchSweep {
        batches: batch_count,
        parallel,
        ..BranchSweep::default()
    };

    for (index, batch) in branches.chunks(batch_size).enumerate() {
        debug!("Processing batch {}/{} with {} branches", index + 1, batch_count, batch.len());

        let outcomes = if parallel {
            join_all(batch.iter().map(|branch| search_branch(api, branch, request, config))).await
        } else {
            let mut outcomes = Vec::with_capacity(batch.len());
            for branch in batch {
                outcomes.push(search_branch(api, branch, request, config).await);
            }
            outcomes
        };

        for outcome in outcomes {
            match outcome {
                Some(records) => {
                    result.succeeded += 1;
                    result.vehicles.extend(records);
                }
                None => result.failed += 1,
            }
        }

        if index + 1 < batch_count {
            tokio::time::sleep(config.batch_delay).await;
        }
    }

    info!(
        "Collected {} vehicles from {}/{} branches",
        result.vehicles.len(),
        result.succeeded,
        branches.len()
    );
    result
}

/// One branch: `None` when the call itself failed
async fn search_branch(
    api: &dyn RentalApi,
    branch: &Branch,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Option<Vec<VehicleRecord>> {
    let payload = SearchPayload::for_branch(branch, request);

    match api.search_branch(&payload).await {
        Ok(body) => Some(normalize_capped(&body, branch, config.max_vehicles_per_branch)),
        Err(e) => {
            warn!(
                branch = %branch.name,
                branch_id = %branch.branch_id,
                error = %format!("{e:#}"),
                "Branch search failed; skipping"
            );
            None
        }
    }
}
