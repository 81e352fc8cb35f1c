//! # stitch-core
//!
//! Server-side fragment composition.
//!
//! A document is scanned for `<fragment src="…">` placeholders. Each one is
//! fetched through a [`Fetcher`], parsed, recursively composed, and spliced
//! into the document in its place. `<link>` elements found in fetched content
//! are moved into the document `head`. When a source cannot be resolved the
//! placeholder's own children are rendered instead.
//!
//! - **resolver**: turns one placeholder into a detached sub-tree, or an error
//! - **hoist**: copies elements into the document `head`
//! - **composer**: drives the walk, fallback, recursion and splicing
//! - **config**: tunables, deserializable from JSON
//!
//! Composition is single-threaded and mutates the document in place.

// Re-export foundation crates
pub use stitch_dom as dom;
pub use stitch_html as html;
pub use stitch_traits as traits;

pub mod composer;
pub mod config;
pub mod error;
pub mod hoist;
pub mod resolver;

pub use composer::{ComposeReport, Composer, PlaceholderState};
pub use config::{ComposeConfig, HeadPolicy};
pub use error::{ComposeError, ResolveError};
pub use stitch_traits::{FetchError, FetchResponse, Fetcher, InMemoryFetcher};
