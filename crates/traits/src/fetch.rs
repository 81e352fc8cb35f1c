//! Fetcher trait for abstracting fragment retrieval.
//!
//! The composer never talks to the network directly. It asks a [`Fetcher`] for
//! a URL and gets back a status code and a fully-read body, so the transport
//! can be swapped for a test double or a local directory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for fetch operations that never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to reach '{url}': {message}")]
    Transport { url: String, message: String },

    #[error("Request to '{url}' timed out")]
    Timeout { url: String },

    #[error("Response body from '{url}' exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// A completed response. The body has already been read in full, so no
/// connection is held once this value exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn not_found() -> Self {
        Self::new(404, Vec::new())
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A capability for fetching fragment sources by URL.
///
/// # Implementations
///
/// - `HttpFetcher` (stitch-fetch): blocking HTTP(S) client
/// - `DirectoryFetcher` (stitch-fetch): serves files below a base directory
/// - [`InMemoryFetcher`]: fixed route table, always available
///
/// Non-200 statuses are reported as responses, not errors. An `Err` means no
/// response was obtained at all.
pub trait Fetcher: Send + Sync + Debug {
    /// Performs a GET for `url`.
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(url)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[derive(Debug, Clone)]
enum Route {
    Respond(FetchResponse),
    Fail(FetchError),
}

/// A fetcher answering from a pre-populated route table.
///
/// Unknown URLs answer `404` with an empty body. Every call is counted so tests
/// can assert how often a URL was requested.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    routes: RwLock<HashMap<String, Route>>,
    hits: RwLock<HashMap<String, usize>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `200` response for `url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the route table lock is poisoned.
    pub fn add(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Result<(), FetchError> {
        self.add_response(url, FetchResponse::ok(body))
    }

    /// Registers an arbitrary response for `url`.
    pub fn add_response(
        &self,
        url: impl Into<String>,
        response: FetchResponse,
    ) -> Result<(), FetchError> {
        self.insert(url.into(), Route::Respond(response))
    }

    /// Makes `url` fail without a response.
    pub fn add_failure(&self, url: impl Into<String>, error: FetchError) -> Result<(), FetchError> {
        self.insert(url.into(), Route::Fail(error))
    }

    fn insert(&self, url: String, route: Route) -> Result<(), FetchError> {
        let mut routes = self.routes.write().map_err(|_| FetchError::Transport {
            url: url.clone(),
            message: "route table lock poisoned".to_string(),
        })?;
        routes.insert(url, route);
        Ok(())
    }

    /// Builder-style variant of [`InMemoryFetcher::add`]. Recovers a poisoned table.
    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let routes = match self.routes.get_mut() {
            Ok(routes) => routes,
            Err(poisoned) => poisoned.into_inner(),
        };
        routes.insert(url.into(), Route::Respond(FetchResponse::ok(body)));
        self
    }

    /// Number of `fetch` calls made for `url`.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn hits(&self, url: &str) -> usize {
        self.hits
            .read()
            .map(|h| h.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Number of `fetch` calls across all URLs.
    pub fn total_hits(&self) -> usize {
        self.hits.read().map(|h| h.values().sum()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.routes.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl Fetcher for InMemoryFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        if let Ok(mut hits) = self.hits.write() {
            *hits.entry(url.to_string()).or_insert(0) += 1;
        }

        let routes = self
            .routes
            .read()
            .map_err(|_| FetchError::Io("route table lock poisoned".to_string()))?;
        match routes.get(url) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::Fail(error)) => Err(error.clone()),
            None => Ok(FetchResponse::not_found()),
        }
    }

    fn name(&self) -> &'static str {
        "InMemoryFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_in_memory_fetcher_add_and_fetch() {
        let fetcher = InMemoryFetcher::new();
        fetcher.add("http://frag/a", "<p>a</p>").unwrap();

        let response = fetcher.fetch("http://frag/a").unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body, b"<p>a</p>");
    }

    #[test]
    fn test_in_memory_fetcher_unknown_url_is_404() {
        let fetcher = InMemoryFetcher::new();
        let response = fetcher.fetch("http://frag/missing").unwrap();
        assert_eq!(response.status, 404);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_in_memory_fetcher_custom_status() {
        let fetcher = InMemoryFetcher::new();
        fetcher
            .add_response("http://frag/err", FetchResponse::new(500, "boom"))
            .unwrap();
        let response = fetcher.fetch("http://frag/err").unwrap();
        assert_eq!(response.status, 500);
        assert!(!response.is_ok());
    }

    #[test]
    fn test_in_memory_fetcher_failure() {
        let fetcher = InMemoryFetcher::new();
        fetcher.add_failure(
            "http://down",
            FetchError::Transport {
                url: "http://down".to_string(),
                message: "connection refused".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(
            fetcher.fetch("http://down"),
            Err(FetchError::Transport { .. })
        ));
    }

    #[test]
    fn test_in_memory_fetcher_counts_hits() {
        let fetcher = InMemoryFetcher::new().with("http://frag/a", "a");
        fetcher.fetch("http://frag/a").unwrap();
        fetcher.fetch("http://frag/a").unwrap();
        fetcher.fetch("http://frag/b").unwrap();

        assert_eq!(fetcher.hits("http://frag/a"), 2);
        assert_eq!(fetcher.hits("http://frag/b"), 1);
        assert_eq!(fetcher.hits("http://frag/c"), 0);
        assert_eq!(fetcher.total_hits(), 3);
    }

    #[test]
    fn test_in_memory_fetcher_overwrite() {
        let fetcher = InMemoryFetcher::new();
        fetcher.add("u", "original").unwrap();
        fetcher.add("u", "updated").unwrap();
        assert_eq!(fetcher.fetch("u").unwrap().body, b"updated");
        assert_eq!(fetcher.len(), 1);
    }

    #[test]
    fn test_in_memory_fetcher_empty() {
        let fetcher = InMemoryFetcher::new();
        assert!(fetcher.is_empty());
        assert_eq!(fetcher.name(), "InMemoryFetcher");
    }

    #[test]
    fn test_arc_fetcher_delegates() {
        let fetcher = Arc::new(InMemoryFetcher::new().with("u", "body"));
        let shared: Arc<dyn Fetcher> = fetcher.clone();
        assert_eq!(shared.fetch("u").unwrap().body, b"body");
        assert_eq!(fetcher.hits("u"), 1);
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Timeout {
            url: "http://slow".to_string(),
        };
        assert!(err.to_string().contains("http://slow"));

        let err = FetchError::BodyTooLarge {
            url: "http://big".to_string(),
            limit: 10,
        };
        assert!(err.to_string().contains("10 bytes"));
    }

    #[test]
    fn test_fetch_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FetchError = io_err.into();
        assert!(matches!(err, FetchError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_in_memory_fetcher_reports_poisoned_lock() {
        let fetcher = Arc::new(InMemoryFetcher::new());
        let holder = fetcher.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.routes.write().unwrap();
            panic!("poison the route table");
        })
        .join();

        assert!(matches!(
            fetcher.add("u", "body"),
            Err(FetchError::Transport { ref url, .. }) if url == "u"
        ));
        assert!(matches!(
            fetcher.add_failure("v", FetchError::Io("x".to_string())),
            Err(FetchError::Transport { .. })
        ));
    }
}
