/// Kind of a decoded element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Array,
    Str,
    Int,
}

/// Index of a node in its [`Tree`]. Parent links are plain indices, so
/// navigating up never touches ownership; the flat vector owns every
/// node and the whole tree drops with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Content {
    /// Not sealed yet. Arrays stay here; their payload is `children`.
    Pending,
    Int(i64),
    Text(String),
    /// The element's extent could not be reconciled with its declared
    /// length; the scanned region is kept for diagnostics.
    Anomaly(String),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub declared_len: Option<usize>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub content: Content,
    /// Exact characters consumed while building this node.
    pub raw: String,
}

#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates a node and, when a parent is given, appends it to that
    /// parent's children in encounter order.
    pub(crate) fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            declared_len: None,
            parent,
            children: Vec::new(),
            content: Content::Pending,
            raw: String::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
