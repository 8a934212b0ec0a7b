//! Runtime configuration, read from the environment after loading `.env`.

use std::str::FromStr;
use std::sync::Once;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://apigw.garenta.com.tr/";
pub const DEFAULT_TENANT_ID: &str = "4cdb69b2-f39b-4f2f-8302-b6198501bcc9";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

static INIT: Once = Once::new();

/// Load `.env` exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Optional env var (None if unset or blank).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parsed env var with default fallback on absence or parse failure.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key)
        .and_then(|raw| raw.parse::<T>().ok())
        .unwrap_or(default)
}

/// Settings for the upstream HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub tenant_id: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Fan-out policy for the per-branch searches
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Branches searched concurrently per batch
    pub batch_size: usize,
    /// Pause between two batches
    pub batch_delay: Duration,
    /// At or below this many branches, search one branch at a time
    pub sequential_threshold: usize,
    /// Keep only the first N vehicles of each branch response
    pub max_vehicles_per_branch: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(200),
            sequential_threshold: 3,
            max_vehicles_per_branch: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub search: SearchConfig,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            search: SearchConfig::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let upstream = UpstreamConfig {
            base_url: env_opt("RENTAL_API_BASE_URL").unwrap_or(defaults.upstream.base_url),
            tenant_id: env_opt("RENTAL_TENANT_ID").unwrap_or(defaults.upstream.tenant_id),
            connect_timeout: Duration::from_secs(env_parse(
                "HTTP_CONNECT_TIMEOUT_SECS",
                defaults.upstream.connect_timeout.as_secs(),
            )),
            timeout: Duration::from_secs(env_parse(
                "HTTP_TIMEOUT_SECS",
                defaults.upstream.timeout.as_secs(),
            )),
        };

        let search = SearchConfig {
            // a zero batch size would never make progress
            batch_size: env_parse("SEARCH_BATCH_SIZE", defaults.search.batch_size).max(1),
            batch_delay: Duration::from_millis(env_parse(
                "SEARCH_BATCH_DELAY_MS",
                defaults.search.batch_delay.as_millis() as u64,
            )),
            sequential_threshold: env_parse(
                "SEARCH_SEQUENTIAL_THRESHOLD",
                defaults.search.sequential_threshold,
            ),
            max_vehicles_per_branch: env_opt("MAX_VEHICLES_PER_BRANCH")
                .and_then(|raw| raw.parse().ok()),
        };

        let config = Self {
            upstream,
            search,
            bind_addr: env_opt("BIND_ADDR").unwrap_or(defaults.bind_addr),
        };

        info!(
            target = "config",
            base_url = %config.upstream.base_url,
            batch_size = config.search.batch_size,
            batch_delay_ms = config.search.batch_delay.as_millis() as u64,
            sequential_threshold = config.search.sequential_threshold,
            "configuration loaded"
        );

        config
    }
}
