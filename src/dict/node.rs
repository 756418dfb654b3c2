//! Arena-backed lattice nodes produced by dictionary lookups.
//!
//! Every `predict` call owns one `NodeArena`; nodes returned by lookups and
//! nodes fabricated by the realtime/suffix aggregators all live there and
//! are bulk-dropped when the call returns. `NodeId` replaces the linked-list
//! chaining of the backing stores with plain indices.

/// Attribute bits carried on a dictionary node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeAttributes(u16);

impl NodeAttributes {
    pub const SPELLING_CORRECTION: Self = Self(1 << 0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// A dictionary word: reading, surface, POS ids, and word cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub key: String,
    pub value: String,
    pub lid: u16,
    pub rid: u16,
    /// Word cost, -500 * log(prob).
    pub wcost: i32,
    pub attributes: NodeAttributes,
}

/// Index of a node inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

/// Bump allocator for the nodes of one prediction call.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
