//! Lookup of named document sections such as `head`.

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;
use crate::walk::walk;

/// Ascends from `node` to the node with no parent.
pub fn find_root(doc: &Document, node: NodeId) -> NodeId {
    let mut root = node;
    while let Some(parent) = doc.parent(root) {
        root = parent;
    }
    root
}

/// Finds the first element named `tag` in the walk of the root above `from`.
pub fn find_section(doc: &Document, tag: &str, from: NodeId) -> Result<NodeId, DomError> {
    let root = find_root(doc, from);
    walk(doc, root)
        .find(|&id| doc.is_element_named(id, tag))
        .ok_or_else(|| {
            log::debug!("No <{}> below root {:?}", tag, root);
            DomError::SectionNotFound(tag.to_string())
        })
}
