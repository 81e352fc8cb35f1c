// src/builder.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stitch_core::{Composer, HeadPolicy};
use stitch_fetch::{DirectoryFetcher, HttpFetcher};
use stitch_traits::Fetcher;

use crate::config::StitchConfig;
use crate::error::StitchError;

/// A builder for creating a [`Composer`].
///
/// Without an explicit fetcher, the composer fetches over HTTP, or from
/// `fragments_dir` when one is configured.
#[derive(Debug, Default)]
pub struct ComposerBuilder {
    config: StitchConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl ComposerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads settings from a JSON file, replacing any set so far.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, StitchError> {
        self.config = StitchConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_config(mut self, config: StitchConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `fetcher` for every source, ignoring HTTP and directory settings.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.compose.max_depth = max_depth;
        self
    }

    pub fn with_missing_head(mut self, policy: HeadPolicy) -> Self {
        self.config.compose.missing_head = policy;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.http.timeout_secs = timeout_secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.http.user_agent = user_agent.into();
        self
    }

    pub fn with_fragments_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.fragments_dir = Some(dir.into());
        self
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    pub fn build(self) -> Result<Composer, StitchError> {
        self.config.validate()?;

        let fetcher: Arc<dyn Fetcher> = match (self.fetcher, &self.config.fragments_dir) {
            (Some(fetcher), _) => fetcher,
            (None, Some(dir)) => {
                if !dir.is_dir() {
                    return Err(StitchError::Config(format!(
                        "Fragments directory '{}' does not exist",
                        dir.display()
                    )));
                }
                Arc::new(DirectoryFetcher::new(dir))
            }
            (None, None) => Arc::new(HttpFetcher::with_config(self.config.http.clone())),
        };
        log::debug!("Building composer with {}", fetcher.name());

        Ok(Composer::new(fetcher).with_config(self.config.compose))
    }
}
