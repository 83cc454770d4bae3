use crate::reference::NodeId;
use crate::types::Var;
use crate::utils::MyHash;

/// A diagram node: either a boolean leaf or an internal decision node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf(bool),
    Internal { variable: Var, low: NodeId, high: NodeId },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// The tested variable, `None` for leaves.
    pub fn variable(&self) -> Option<Var> {
        match *self {
            Node::Leaf(_) => None,
            Node::Internal { variable, .. } => Some(variable),
        }
    }

    /// The `(low, high)` children, `None` for leaves.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Node::Leaf(_) => None,
            Node::Internal { low, high, .. } => Some((low, high)),
        }
    }
}

/// Key of an internal node in the canonical store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeKey {
    pub variable: Var,
    pub low: NodeId,
    pub high: NodeId,
}

impl NodeKey {
    pub fn new(variable: Var, low: NodeId, high: NodeId) -> Self {
        Self { variable, low, high }
    }
}

impl MyHash for NodeKey {
    fn hash(&self) -> u64 {
        let x = self.variable.index() as u64;
        let y = self.low.raw() as u64;
        let z = self.high.raw() as u64;
        MyHash::hash(&(x, y, z))
    }
}
