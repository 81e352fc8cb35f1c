//! Copying elements into the document head.

use stitch_dom::{DomError, Document, NodeId, find_section};

use crate::config::HEAD_TAG;

/// Appends a copy of `element` to the `head` of the document containing `root`.
///
/// The copy carries the element's kind, tag and attributes and takes over its
/// children. The original stays where it is; detaching it is up to the caller.
/// Returns the id of the copy.
pub fn add_header(doc: &mut Document, root: NodeId, element: NodeId) -> Result<NodeId, DomError> {
    let head = find_section(doc, HEAD_TAG, root)?;
    let copy = doc.shallow_copy(element);
    doc.reparent_children(element, copy)?;
    doc.append_child(head, copy)?;
    Ok(copy)
}

/// Hook for relocating scripts found in fetched content. Intentionally a no-op:
/// scripts stay where the fragment put them.
pub fn add_script(_doc: &mut Document, _node: NodeId) -> Result<(), DomError> {
    Ok(())
}
