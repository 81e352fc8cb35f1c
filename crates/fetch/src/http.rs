//! Blocking HTTP fetcher.

use std::time::Duration;

use serde::Deserialize;
use stitch_traits::{FetchError, FetchResponse, Fetcher};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("stitch/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound for a whole request, connect to last body byte. `0` disables it.
    ///
    /// Defaults to `30`.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Responses larger than this fail with `FetchError::BodyTooLarge`.
    ///
    /// Defaults to 10 MiB.
    pub max_body_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Fetches fragment sources over HTTP(S).
///
/// Statuses other than 2xx are returned as responses so the caller decides what
/// counts as failure. The body is always read to the end (or to the size limit)
/// before returning, which hands the connection back to the agent's pool.
pub struct HttpFetcher {
    agent: ureq::Agent,
    config: HttpConfig,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, config }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn map_error(&self, url: &str, err: ureq::Error) -> FetchError {
        match err {
            ureq::Error::Timeout(_) => FetchError::Timeout {
                url: url.to_string(),
            },
            ureq::Error::BodyExceedsLimit(_) => FetchError::BodyTooLarge {
                url: url.to_string(),
                limit: self.config.max_body_bytes,
            },
            other => FetchError::Transport {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        log::debug!("GET {}", parsed);
        let mut response = self
            .agent
            .get(parsed.as_str())
            .header("User-Agent", &self.config.user_agent)
            .call()
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.max_body_bytes)
            .read_to_vec()
            .map_err(|e| self.map_error(url, e))?;

        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}
