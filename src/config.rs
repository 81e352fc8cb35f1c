// src/config.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stitch_core::ComposeConfig;
use stitch_fetch::HttpConfig;

use crate::error::StitchError;

/// Everything a [`ComposerBuilder`](crate::ComposerBuilder) can be configured with.
///
/// ```json
/// {
///   "compose": { "max_depth": 8, "missing_head": "ignore" },
///   "http": { "timeout_secs": 5 },
///   "fragments_dir": "./fragments"
/// }
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StitchConfig {
    pub compose: ComposeConfig,
    pub http: HttpConfig,
    /// Serve fragment sources from this directory instead of over HTTP.
    pub fragments_dir: Option<PathBuf>,
}

impl StitchConfig {
    pub fn from_json(json: &str) -> Result<Self, StitchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config file. A relative `fragments_dir` is resolved against the
    /// directory containing the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StitchError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            StitchError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        let mut config = Self::from_json(&source)?;

        if let Some(dir) = config.fragments_dir.as_mut() {
            if dir.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                *dir = base.join(&*dir);
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StitchError> {
        if self.compose.placeholder_tag.is_empty() {
            return Err(StitchError::Config("placeholder_tag must not be empty".to_string()));
        }
        if self.compose.source_attr.is_empty() {
            return Err(StitchError::Config("source_attr must not be empty".to_string()));
        }
        if self.compose.context_tag.is_empty() {
            return Err(StitchError::Config("context_tag must not be empty".to_string()));
        }
        Ok(())
    }
}
