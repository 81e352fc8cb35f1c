//! Arena-backed document tree for fragment composition.
//!
//! Nodes live in a single [`Document`] and are addressed by [`NodeId`]. Parent,
//! child and sibling links are plain indices, so splicing a sub-tree never
//! invalidates handles held elsewhere.
//!
//! ## Modules
//!
//! - [`document`]: the arena and its mutation operations
//! - [`walk`]: the reverse document-order traversal used to find placeholders
//! - [`section`]: lookup of a named top-level section (e.g. `head`)

pub mod document;
pub mod error;
pub mod node;
pub mod section;
pub mod walk;

pub use document::{Children, Document};
pub use error::DomError;
pub use node::{Attribute, Node, NodeId, NodeKind};
pub use section::{find_root, find_section};
pub use walk::{Walk, walk};
