use thiserror::Error;

/// Failures that abort a whole availability search.
///
/// Per-branch failures never show up here; they are absorbed by the
/// orchestrator and only shrink the result set.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),
    #[error("No branches found for city: {city_slug}")]
    NotFound { city_slug: String },
    #[error("Failed to fetch branch catalog: {0:#}")]
    Transport(#[source] anyhow::Error),
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the caller, rather than the system, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}
