//! Node payloads and relational links.

/// A stable handle to a node inside a [`crate::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single `key="value"` pair on an element. Keys are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What a node is. Only elements carry a tag name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// An element. An empty `name` marks an anonymous wrapper element.
    Element {
        name: String,
        attrs: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

impl NodeKind {
    pub fn element(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        NodeKind::Element {
            name: name.into(),
            attrs,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element { .. })
    }

    /// The tag name of an element, `None` for every other kind.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

/// A node slot in the arena: its payload plus non-owning links to its neighbours.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// True when the node has no parent and no siblings.
    pub fn is_detached(&self) -> bool {
        self.parent.is_none() && self.prev_sibling.is_none() && self.next_sibling.is_none()
    }
}
