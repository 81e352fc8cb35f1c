use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by structural tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Section <{0}> not found in document")]
    SectionNotFound(String),

    #[error("Node {0:?} is still attached to a parent or siblings")]
    AlreadyAttached(NodeId),

    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Cannot attach node {0:?} to itself or one of its descendants")]
    Cycle(NodeId),
}
