use crate::config::UpstreamConfig;
use crate::providers::traits::RentalApi;
use crate::providers::types::SearchPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Response};
use serde_json::json;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const DEVICE_INFO_HEADER: &str = "x-web-device-info";

/// Garenta API gateway client
pub struct GarentaClient {
    client: Client,
    base_url: String,
}

impl GarentaClient {
    /// Create a client against the public gateway with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(&UpstreamConfig::default())
    }

    /// Create a client with custom base URL, tenant and timeouts
    pub fn with_config(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("tr"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(
            TENANT_HEADER,
            HeaderValue::from_str(&config.tenant_id).context("Invalid tenant id header value")?,
        );

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Per-request device fingerprint; the session id is the current epoch millis
    fn device_info() -> String {
        json!({
            "browser": "Chrome",
            "webDeviceType": "desktop",
            "os": "Windows",
            "sessionId": Utc::now().timestamp_millis(),
        })
        .to_string()
    }

    async fn read_body(response: Response, what: &str) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", what, status);
            anyhow::bail!("{} failed with status {}", what, status);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response body", what))?;
        debug!("{} returned {} bytes", what, body.len());
        Ok(body)
    }
}

#[async_trait]
impl RentalApi for GarentaClient {
    async fn fetch_branch_catalog(&self) -> Result<String> {
        let url = self.endpoint("GetBranchesData");
        debug!("Fetching branch catalog: {}", url);

        let response = self
            .client
            .get(&url)
            .header(DEVICE_INFO_HEADER, Self::device_info())
            .send()
            .await
            .context("Failed to fetch branch catalog")?;

        Self::read_body(response, "Branch catalog").await
    }

    async fn search_branch(&self, payload: &SearchPayload) -> Result<String> {
        let url = self.endpoint("Search");
        debug!(
            branch_id = %payload.branch_id,
            location_id = %payload.location_id,
            "Searching branch: {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .header(DEVICE_INFO_HEADER, Self::device_info())
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to search branch {}", payload.branch_id))?;

        Self::read_body(response, "Branch search").await
    }

    fn source_name(&self) -> &'static str {
        "Garenta"
    }
}
