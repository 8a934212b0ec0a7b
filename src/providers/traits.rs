use crate::providers::types::SearchPayload;
use anyhow::Result;
use async_trait::async_trait;

/// The two upstream endpoints the aggregator depends on.
///
/// Implementations return raw response bodies; parsing is left to the
/// catalog resolver and the vehicle normalizer so that a fake upstream only
/// needs to hand back JSON text.
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Fetch the full branch catalog
    async fn fetch_branch_catalog(&self) -> Result<String>;

    /// Run an availability search for one branch
    async fn search_branch(&self, payload: &SearchPayload) -> Result<String>;

    /// Get the name of the upstream provider
    fn source_name(&self) -> &'static str;
}
