//! Error types for fragment resolution and composition.
//!
//! [`ResolveError`]s are recovered inside the composer by rendering fallback
//! content; they never reach the caller of `compose_node`. [`ComposeError`] is
//! what aborts a composition.

use stitch_dom::DomError;
use stitch_html::HtmlError;
use stitch_traits::FetchError;
use thiserror::Error;

/// Why a single placeholder could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Placeholder has no '{0}' attribute")]
    MissingSource(String),

    #[error("Failed to fetch '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Source '{url}' answered with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Response from '{url}' could not be parsed: {source}")]
    FragmentParse {
        url: String,
        #[source]
        source: HtmlError,
    },

    #[error("Placeholder depth {depth} exceeds the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

/// The main error enum for composition.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Input is not a parseable HTML document: {0}")]
    Parse(#[source] HtmlError),

    #[error("Document has no <{0}> section to hoist into")]
    SectionNotFound(String),

    #[error("Document structure error: {0}")]
    Dom(DomError),

    #[error("Failed to serialize composed document: {0}")]
    Serialize(#[source] HtmlError),
}

impl From<DomError> for ComposeError {
    fn from(e: DomError) -> Self {
        match e {
            DomError::SectionNotFound(tag) => ComposeError::SectionNotFound(tag),
            other => ComposeError::Dom(other),
        }
    }
}
