//! # stitch
//!
//! Server-side HTML composition. Documents carry `<fragment src="…">`
//! placeholders; `stitch` fetches each source, composes it recursively, moves
//! any `<link>` it brings along into the document `head`, and splices the
//! result in place of the placeholder. Unreachable sources render the
//! placeholder's own children instead.
//!
//! ```no_run
//! use stitch::ComposerBuilder;
//!
//! let composer = ComposerBuilder::new().with_timeout(5).build()?;
//! let html = composer.compose_str(r#"<fragment src="http://localhost:8080/nav">menu</fragment>"#)?;
//! # Ok::<(), stitch::StitchError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;

pub use builder::ComposerBuilder;
pub use config::StitchConfig;
pub use error::StitchError;

pub use stitch_core::{
    ComposeConfig, ComposeError, ComposeReport, Composer, HeadPolicy, PlaceholderState,
    ResolveError,
};
pub use stitch_fetch::{DirectoryFetcher, HttpConfig, HttpFetcher};
pub use stitch_traits::{FetchError, FetchResponse, Fetcher, InMemoryFetcher};

pub use stitch_dom as dom;
pub use stitch_html as html;
