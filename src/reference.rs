use std::fmt::{Display, Formatter};

/// Handle to a node slot in a diagram's [`Storage`][crate::storage::Storage].
///
/// The index is stable for as long as the node is alive, so it doubles as the node's
/// identity: the canonical store hashes and compares children by `NodeId`, never by
/// memory address.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the slot index of the node.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the raw representation, used as hash input.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
