//! Reverse document-order traversal.
//!
//! `walk(n)` lists every node that follows `n` in document pre-order, last one
//! first. Equivalently, with `succ(n)` the pre-order successor of `n` (first
//! child, else next sibling, else the next sibling of the nearest ancestor that
//! has one):
//!
//! ```text
//! order(n) = order(succ(n)) ++ [succ(n)]    if succ(n) exists
//!          = []                              otherwise
//! ```
//!
//! A node's descendants are therefore always emitted before the node itself,
//! and later siblings before earlier ones. The starting node is never part of
//! its own walk.
//!
//! The result is a snapshot taken when [`walk`] is called. Mutating the tree
//! afterwards does not affect an existing [`Walk`], so callers may splice nodes
//! while iterating it.

use crate::document::Document;
use crate::node::NodeId;

/// A snapshot of a walk. Iterating consumes it.
#[derive(Debug, Clone)]
pub struct Walk {
    nodes: std::vec::IntoIter<NodeId>,
}

impl Walk {
    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes.collect()
    }
}

impl Iterator for Walk {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.nodes.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for Walk {}

/// Walks the nodes following `node`. See the module docs for the order.
pub fn walk(doc: &Document, node: NodeId) -> Walk {
    let mut following = Vec::new();
    let mut cursor = successor(doc, node);
    while let Some(next) = cursor {
        following.push(next);
        cursor = successor(doc, next);
    }
    following.reverse();
    Walk {
        nodes: following.into_iter(),
    }
}

fn successor(doc: &Document, node: NodeId) -> Option<NodeId> {
    if let Some(child) = doc.first_child(node) {
        return Some(child);
    }
    let mut current = node;
    loop {
        if let Some(next) = doc.next_sibling(current) {
            return Some(next);
        }
        current = doc.parent(current)?;
    }
}
