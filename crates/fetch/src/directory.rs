//! Directory-backed fetcher for offline composition.
//!
//! Maps a fragment URL onto a file below a base directory. Absolute URLs
//! (`file:`, `http(s):` and the like) contribute their percent-decoded path
//! segments; anything that does not parse as an absolute URL is taken as a
//! relative path, verbatim. The result always stays inside the base directory.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use stitch_traits::{FetchError, FetchResponse, Fetcher};
use url::{ParseError, Url};

/// A fetcher that answers from files below a base directory.
///
/// Missing files answer `404`. Paths that would escape the base directory
/// answer `403`.
#[derive(Debug)]
pub struct DirectoryFetcher {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl DirectoryFetcher {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves the file a URL refers to, or `None` if it leaves the base directory.
    fn resolve(&self, url: &str) -> Result<Option<PathBuf>, FetchError> {
        let Some(relative) = relative_path(url)? else {
            return Ok(None);
        };

        let full_path = self.base_path.join(relative);
        match (full_path.canonicalize(), &self.canonical_base) {
            (Ok(canonical), Some(base)) if !canonical.starts_with(base) => Ok(None),
            _ => Ok(Some(full_path)),
        }
    }
}

/// The path below the base directory that `url` names, or `None` if it
/// cannot stay below it.
fn relative_path(url: &str) -> Result<Option<PathBuf>, FetchError> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => return Ok(plain_path(url)),
        Err(_) => return Err(FetchError::InvalidUrl(url.to_string())),
    };
    let Some(segments) = parsed.path_segments() else {
        return Ok(None);
    };

    let mut path = PathBuf::new();
    for segment in segments {
        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        match decoded.as_ref() {
            "" | "." => continue,
            ".." => return Ok(None),
            name if name.contains(['/', '\\']) => return Ok(None),
            name => path.push(name),
        }
    }
    Ok(Some(path))
}

/// A bare path, minus any query string or fragment, rooted in the base directory.
fn plain_path(url: &str) -> Option<PathBuf> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let relative = Path::new(url[..end].trim_start_matches('/'));
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then(|| relative.to_path_buf())
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let Some(path) = self.resolve(url)? else {
            log::warn!("Refusing to serve '{}' outside {}", url, self.base_path.display());
            return Ok(FetchResponse::new(403, Vec::new()));
        };

        match std::fs::read(&path) {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No file for '{}' at {}", url, path.display());
                Ok(FetchResponse::not_found())
            }
            Err(e) if path.is_dir() => {
                log::debug!("'{}' resolves to a directory: {}", url, e);
                Ok(FetchResponse::not_found())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "DirectoryFetcher"
    }
}
