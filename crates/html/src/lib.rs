//! HTML parsing and serialization for stitch documents.
//!
//! Parsing delegates tree construction to `html5ever` and copies the result into
//! a [`stitch_dom::Document`]. Serialization writes markup directly from the
//! arena, including anonymous (tag-less) elements as `<>…</>`.

mod error;
mod parse;
mod serialize;

pub use error::HtmlError;
pub use parse::{DEFAULT_CONTEXT_TAG, parse_document, parse_fragment, parse_str};
pub use serialize::{serialize, to_string};
