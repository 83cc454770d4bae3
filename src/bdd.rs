//! The diagram aggregate and its core algorithms.
//!
//! A [`Bdd`] owns everything one diagram needs: the node arena, the canonical store,
//! the variable order, the root and the allocation counter. Nodes are addressed by
//! [`NodeId`] handles; every handle returned by a constructor is an *owned* reference
//! which must eventually be given back via [`Bdd::release_node`], stored as the root,
//! or consumed by [`Bdd::mk_node`].
//!
//! # Ownership protocol
//!
//! - [`Bdd::mk_leaf`], [`Bdd::mk_var`], [`Bdd::mk_node`] and [`Bdd::apply`] return a
//!   reference owned by the caller (reference count +1).
//! - [`Bdd::mk_node`] takes over the caller's references to `low` and `high`.
//! - [`Bdd::apply`] only borrows its operands.
//! - A node whose count drops to zero is unregistered from the store, its slot is freed,
//!   and its children are released in turn.
//!
//! # Apply
//!
//! Combination follows Shannon expansion driven by the variable order: at recursion
//! depth `d` both operands are split on `order[d]`; an operand that does not test that
//! variable contributes itself to both cofactors. Results are canonicalized through
//! [`Bdd::mk_node`], so every node created at depth `d` tests `order[d]`.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Debug, Display};

use log::debug;

use crate::error::{BddError, Result};
use crate::node::{Node, NodeKey};
use crate::order::VarOrder;
use crate::reference::NodeId;
use crate::storage::Storage;
use crate::table::{Table, DEFAULT_BUCKETS};
use crate::types::{Level, Var};

/// How leaf nodes are allocated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LeafPolicy {
    /// Every leaf request allocates a new leaf node.
    #[default]
    Fresh,
    /// One leaf node per boolean value, shared by all requests.
    Shared,
}

/// Construction parameters of a [`Bdd`].
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Node arena capacity, in bits: at most `2^storage_bits` live nodes (default: 20).
    pub storage_bits: usize,
    /// Initial bucket count of the canonical store (default: 1024).
    pub initial_buckets: usize,
    /// Leaf allocation policy (default: [`LeafPolicy::Fresh`]).
    pub leaf_policy: LeafPolicy,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 20,
            initial_buckets: DEFAULT_BUCKETS,
            leaf_policy: LeafPolicy::Fresh,
        }
    }
}

impl BddConfig {
    pub fn with_storage_bits(mut self, bits: usize) -> Self {
        self.storage_bits = bits;
        self
    }

    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_leaf_policy(mut self, leaf_policy: LeafPolicy) -> Self {
        self.leaf_policy = leaf_policy;
        self
    }

    /// Check that `storage_bits` is in `1..=31` and `initial_buckets` is nonzero.
    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.storage_bits) {
            return Err(BddError::InvalidConfig {
                field: "storage_bits",
                value: self.storage_bits,
            });
        }
        if self.initial_buckets == 0 {
            return Err(BddError::InvalidConfig {
                field: "initial_buckets",
                value: self.initial_buckets,
            });
        }
        Ok(())
    }
}

/// Binary operator combined by [`Bdd::apply`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Op {
    And,
    Or,
}

impl Op {
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::And => write!(f, "and"),
            Op::Or => write!(f, "or"),
        }
    }
}

pub struct Bdd {
    storage: RefCell<Storage<Node>>,
    table: RefCell<Table>,
    order: VarOrder,
    root: Cell<Option<NodeId>>,
    num_nodes: Cell<usize>,
    shared_leaves: Cell<[Option<NodeId>; 2]>,
    leaf_policy: LeafPolicy,
}

impl Bdd {
    /// Create an empty diagram (no root) over `order`.
    pub fn new(order: VarOrder) -> Result<Self> {
        Self::with_config(order, &BddConfig::default())
    }

    /// Create an empty diagram over `order` with explicit parameters.
    ///
    /// Fails with [`BddError::InvalidConfig`] when `config` is out of range.
    pub fn with_config(order: VarOrder, config: &BddConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            storage: RefCell::new(Storage::new(config.storage_bits)),
            table: RefCell::new(Table::new(config.initial_buckets)?),
            order,
            root: Cell::new(None),
            num_nodes: Cell::new(0),
            shared_leaves: Cell::new([None, None]),
            leaf_policy: config.leaf_policy,
        })
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("order", &self.order.to_string())
            .field("root", &self.root.get())
            .field("num_nodes", &self.num_nodes.get())
            .field("capacity", &storage.capacity())
            .field("real_size", &storage.real_size())
            .field("table_len", &self.table.borrow().len())
            .finish()
    }
}

impl Bdd {
    pub fn order(&self) -> &VarOrder {
        &self.order
    }

    pub fn storage(&self) -> std::cell::Ref<'_, Storage<Node>> {
        self.storage.borrow()
    }

    pub fn table(&self) -> std::cell::Ref<'_, Table> {
        self.table.borrow()
    }

    pub fn leaf_policy(&self) -> LeafPolicy {
        self.leaf_policy
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root.get()
    }

    /// Install `node` as the root, taking over the caller's reference.
    ///
    /// The previous root, if any, is released.
    pub fn set_root(&self, node: NodeId) {
        if let Some(old) = self.root.replace(Some(node)) {
            self.release_node(old);
        }
    }

    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node of this diagram.
    pub fn node(&self, id: NodeId) -> Node {
        *self.storage.borrow().value(id.index())
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    pub fn leaf_value(&self, id: NodeId) -> Option<bool> {
        match self.node(id) {
            Node::Leaf(value) => Some(value),
            Node::Internal { .. } => None,
        }
    }

    pub fn variable(&self, id: NodeId) -> Option<Var> {
        self.node(id).variable()
    }

    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.node(id).children()
    }

    pub fn ref_count(&self, id: NodeId) -> u32 {
        self.storage.borrow().ref_count(id.index())
    }

    /// Number of nodes allocated over the diagram's lifetime (internal misses and leaves).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes.get()
    }

    /// Number of nodes currently alive in the arena.
    pub fn live_nodes(&self) -> usize {
        self.storage.borrow().real_size()
    }

    /// Number of distinct internal nodes reachable from the root.
    pub fn size(&self) -> usize {
        match self.root() {
            Some(root) => self.size_of(root),
            None => 0,
        }
    }

    /// Number of distinct internal nodes reachable from `node`.
    pub fn size_of(&self, node: NodeId) -> usize {
        self.descendants([node])
            .into_iter()
            .filter(|&id| !self.is_leaf(id))
            .count()
    }

    /// All nodes (leaves included) reachable from `nodes`.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = NodeId>) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(nodes);

        while let Some(node) = queue.pop_front() {
            if visited.insert(node) {
                if let Some((low, high)) = self.children(node) {
                    queue.push_back(low);
                    queue.push_back(high);
                }
            }
        }

        visited
    }
}

impl Bdd {
    /// Take an additional reference to `node`.
    pub fn retain(&self, node: NodeId) -> NodeId {
        self.storage.borrow_mut().retain(node.index());
        node
    }

    /// Give back one reference to `node`, reclaiming everything that becomes unreferenced.
    ///
    /// Returns the number of nodes freed.
    pub fn release_node(&self, node: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![node];

        while let Some(id) = stack.pop() {
            let remaining = self.storage.borrow_mut().release(id.index());
            if remaining > 0 {
                continue;
            }

            let value = self.storage.borrow_mut().free(id.index());
            freed += 1;

            match value {
                Node::Internal { variable, low, high } => {
                    debug!("release: free {} ({}, {}, {})", id, variable, low, high);
                    self.table
                        .borrow_mut()
                        .remove(&NodeKey::new(variable, low, high));
                    stack.push(high);
                    stack.push(low);
                }
                Node::Leaf(value) => {
                    debug!("release: free leaf {} ({})", id, value as u8);
                    let mut shared = self.shared_leaves.get();
                    if shared[value as usize] == Some(id) {
                        shared[value as usize] = None;
                        self.shared_leaves.set(shared);
                    }
                }
            }
        }

        freed
    }

    /// Reclaim the diagram.
    ///
    /// Releases the root (and the shared leaves under [`LeafPolicy::Shared`]), then drops
    /// the store and the order. Nodes still referenced through handles obtained with
    /// [`Bdd::retain`] are reported and dropped with the arena.
    pub fn release(self) {
        let mut freed = 0;
        if let Some(root) = self.root.take() {
            freed += self.release_node(root);
        }
        for leaf in self.shared_leaves.take().into_iter().flatten() {
            freed += self.release_node(leaf);
        }
        debug!(
            "release: reclaimed {} nodes, {} still referenced",
            freed,
            self.live_nodes()
        );
    }
}

impl Bdd {
    /// Allocate a leaf carrying `value`.
    ///
    /// Under [`LeafPolicy::Fresh`] every call allocates a distinct leaf.
    pub fn mk_leaf(&self, value: bool) -> Result<NodeId> {
        if self.leaf_policy == LeafPolicy::Shared {
            if let Some(leaf) = self.shared_leaves.get()[value as usize] {
                return Ok(self.retain(leaf));
            }
        }

        let index = self.storage.borrow_mut().alloc(Node::Leaf(value))?;
        let leaf = NodeId::new(index as u32);
        self.num_nodes.set(self.num_nodes.get() + 1);
        debug!("mk_leaf({}) -> {}", value as u8, leaf);

        if self.leaf_policy == LeafPolicy::Shared {
            // The shared slot keeps its own reference.
            let mut shared = self.shared_leaves.get();
            shared[value as usize] = Some(self.retain(leaf));
            self.shared_leaves.set(shared);
        }

        Ok(leaf)
    }

    /// Canonical internal node testing `variable` with the given children.
    ///
    /// Consumes the caller's references to `low` and `high`. Returns `low` itself when
    /// both children are the same node, the registered node when the triple is already
    /// in the store, and a freshly allocated node otherwise. On failure the references
    /// are released and the store is left as it was.
    pub fn mk_node(&self, variable: Var, low: NodeId, high: NodeId) -> Result<NodeId> {
        debug!("mk(v = {}, low = {}, high = {})", variable, low, high);

        if !self.order.contains(variable) {
            self.release_node(low);
            self.release_node(high);
            return Err(BddError::UnknownVariable(variable));
        }

        // Handle duplicates
        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            self.release_node(high);
            return Ok(low);
        }

        let key = NodeKey::new(variable, low, high);
        let existing = self.table.borrow().search(&key);
        if let Some(node) = existing {
            debug!("mk: found {}", node);
            self.retain(node);
            self.release_node(low);
            self.release_node(high);
            return Ok(node);
        }

        let allocated = self
            .storage
            .borrow_mut()
            .alloc(Node::Internal { variable, low, high });
        let index = match allocated {
            Ok(index) => index,
            Err(e) => {
                self.release_node(low);
                self.release_node(high);
                return Err(e);
            }
        };
        let node = NodeId::new(index as u32);

        let inserted = self.table.borrow_mut().insert(key, node);
        if let Err(e) = inserted {
            self.storage.borrow_mut().free(index);
            self.release_node(low);
            self.release_node(high);
            return Err(e);
        }

        self.num_nodes.set(self.num_nodes.get() + 1);
        debug!("mk: new {}", node);
        Ok(node)
    }

    /// Single-variable diagram: `variable ? 1 : 0`.
    pub fn mk_var(&self, variable: Var) -> Result<NodeId> {
        if !self.order.contains(variable) {
            return Err(BddError::UnknownVariable(variable));
        }

        let zero = self.mk_leaf(false)?;
        let one = match self.mk_leaf(true) {
            Ok(one) => one,
            Err(e) => {
                self.release_node(zero);
                return Err(e);
            }
        };
        self.mk_node(variable, zero, one)
    }

    /// Cofactors of `node` with respect to `variable`.
    ///
    /// A leaf, or a node testing another variable, does not depend on `variable` and is
    /// its own cofactor on both sides.
    pub fn cofactors(&self, node: NodeId, variable: Var) -> (NodeId, NodeId) {
        match self.node(node) {
            Node::Internal { variable: v, low, high } if v == variable => (low, high),
            _ => (node, node),
        }
    }

    /// Combine `f` and `g` with `op`, returning an owned reference to the result.
    pub fn apply(&self, op: Op, f: NodeId, g: NodeId) -> Result<NodeId> {
        self.apply_rec(op, f, g, Level::new(0))
    }

    pub fn apply_and(&self, f: NodeId, g: NodeId) -> Result<NodeId> {
        debug!("apply_and(f = {}, g = {})", f, g);
        self.apply(Op::And, f, g)
    }

    pub fn apply_or(&self, f: NodeId, g: NodeId) -> Result<NodeId> {
        debug!("apply_or(f = {}, g = {})", f, g);
        self.apply(Op::Or, f, g)
    }

    fn apply_rec(&self, op: Op, f: NodeId, g: NodeId, level: Level) -> Result<NodeId> {
        debug!("apply_{}(f = {}, g = {}, level = {})", op, f, g, level);

        let top = match (self.node(f), self.node(g)) {
            (Node::Leaf(a), Node::Leaf(b)) => {
                let value = op.eval(a, b);
                debug!("terminal: {} {} {} => {}", a as u8, op, b as u8, value as u8);
                return self.mk_leaf(value);
            }
            (Node::Internal { variable, .. }, _) | (_, Node::Internal { variable, .. }) => variable,
        };

        let v = self
            .order
            .var_at(level)
            .ok_or(BddError::Unordered { variable: top, level })?;

        let (f0, f1) = self.cofactors(f, v);
        let (g0, g1) = self.cofactors(g, v);
        debug!("cofactors on {}: f0 = {}, f1 = {}, g0 = {}, g1 = {}", v, f0, f1, g0, g1);

        let low = self.apply_rec(op, f0, g0, level.next())?;
        let high = match self.apply_rec(op, f1, g1, level.next()) {
            Ok(high) => high,
            Err(e) => {
                self.release_node(low);
                return Err(e);
            }
        };

        self.mk_node(v, low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn var(ch: char) -> Var {
        Var::from_char(ch).unwrap()
    }

    fn bdd(order: &str) -> Bdd {
        Bdd::new(VarOrder::parse(order).unwrap()).unwrap()
    }

    fn shared_bdd(order: &str) -> Bdd {
        let config = BddConfig {
            leaf_policy: LeafPolicy::Shared,
            ..BddConfig::default()
        };
        Bdd::with_config(VarOrder::parse(order).unwrap(), &config).unwrap()
    }

    #[test]
    fn test_mk_leaf_is_not_interned() {
        let bdd = bdd("A");
        let a = bdd.mk_leaf(true).unwrap();
        let b = bdd.mk_leaf(true).unwrap();
        assert_ne!(a, b);
        assert_eq!(bdd.leaf_value(a), Some(true));
        assert_eq!(bdd.leaf_value(b), Some(true));
        assert_eq!(bdd.num_nodes(), 2);
    }

    #[test]
    fn test_mk_leaf_shared() {
        let bdd = shared_bdd("A");
        let a = bdd.mk_leaf(true).unwrap();
        let b = bdd.mk_leaf(true).unwrap();
        let c = bdd.mk_leaf(false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(bdd.num_nodes(), 2);
        // Two callers plus the shared slot.
        assert_eq!(bdd.ref_count(a), 3);
    }

    #[test]
    fn test_mk_node_canonical_sharing() {
        let bdd = bdd("AB");
        let zero = bdd.mk_leaf(false).unwrap();
        let one = bdd.mk_leaf(true).unwrap();

        let n1 = bdd.mk_node(var('A'), bdd.retain(zero), bdd.retain(one)).unwrap();
        assert_eq!(bdd.ref_count(n1), 1);
        assert_eq!(bdd.ref_count(zero), 2);

        let n2 = bdd.mk_node(var('A'), zero, one).unwrap();
        assert_eq!(n1, n2);
        assert_eq!(bdd.ref_count(n1), 2);
        assert_eq!(bdd.ref_count(zero), 1);
        assert_eq!(bdd.ref_count(one), 1);
        assert_eq!(bdd.num_nodes(), 3);
        assert_eq!(bdd.table().len(), 1);
    }

    #[test]
    fn test_mk_node_reduction() {
        let bdd = bdd("A");
        let leaf = bdd.mk_leaf(false).unwrap();
        let node = bdd.mk_node(var('A'), bdd.retain(leaf), leaf).unwrap();
        assert_eq!(node, leaf);
        assert_eq!(bdd.ref_count(leaf), 1);
        assert_eq!(bdd.num_nodes(), 1);
        assert!(bdd.table().is_empty());
    }

    #[test]
    fn test_mk_node_unknown_variable() {
        let bdd = bdd("AB");
        let zero = bdd.mk_leaf(false).unwrap();
        let one = bdd.mk_leaf(true).unwrap();
        let err = bdd.mk_node(var('C'), zero, one).unwrap_err();
        assert!(matches!(err, BddError::UnknownVariable(v) if v == var('C')));
        assert_eq!(bdd.live_nodes(), 0);
        assert!(matches!(bdd.mk_var(var('Z')), Err(BddError::UnknownVariable(_))));
    }

    #[test]
    fn test_mk_var() {
        let bdd = bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        assert_eq!(bdd.variable(a), Some(var('A')));
        let (low, high) = bdd.children(a).unwrap();
        assert_eq!(bdd.leaf_value(low), Some(false));
        assert_eq!(bdd.leaf_value(high), Some(true));
        assert_eq!(bdd.num_nodes(), 3);
        assert_eq!(bdd.size_of(a), 1);
    }

    #[test]
    fn test_cofactors() {
        let bdd = bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let (low, high) = bdd.children(a).unwrap();
        assert_eq!(bdd.cofactors(a, var('A')), (low, high));
        assert_eq!(bdd.cofactors(a, var('B')), (a, a));
        assert_eq!(bdd.cofactors(low, var('A')), (low, low));
    }

    #[test]
    fn test_apply_and_or() {
        let bdd = shared_bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let b = bdd.mk_var(var('B')).unwrap();

        let f = bdd.apply_and(a, b).unwrap();
        assert_eq!(bdd.variable(f), Some(var('A')));
        let (f0, f1) = bdd.children(f).unwrap();
        assert_eq!(bdd.leaf_value(f0), Some(false));
        assert_eq!(f1, b);
        assert_eq!(bdd.size_of(f), 2);

        let g = bdd.apply_or(a, b).unwrap();
        let (g0, g1) = bdd.children(g).unwrap();
        assert_eq!(g0, b);
        assert_eq!(bdd.leaf_value(g1), Some(true));
    }

    #[test]
    fn test_apply_with_fresh_leaves_keeps_constant_subtrees() {
        // Distinct leaf instances with equal values are not merged, so a constant
        // cofactor still gets its own node.
        let bdd = bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let b = bdd.mk_var(var('B')).unwrap();

        let f = bdd.apply_and(a, b).unwrap();
        let (f0, _) = bdd.children(f).unwrap();
        assert_eq!(bdd.variable(f0), Some(var('B')));
        let (f00, f01) = bdd.children(f0).unwrap();
        assert_ne!(f00, f01);
        assert_eq!(bdd.leaf_value(f00), Some(false));
        assert_eq!(bdd.leaf_value(f01), Some(false));
        assert_eq!(bdd.size_of(f), 3);
    }

    #[test]
    fn test_apply_shares_equal_subresults() {
        let bdd = shared_bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let b = bdd.mk_var(var('B')).unwrap();
        let f = bdd.apply_and(a, b).unwrap();
        let g = bdd.apply_and(b, a).unwrap();
        assert_eq!(f, g);
        assert_eq!(bdd.ref_count(f), 2);
    }

    #[test]
    fn test_apply_unordered() {
        // Order exhausted while an operand still tests a variable above it.
        let bdd = bdd("AB");
        let zero = bdd.mk_leaf(false).unwrap();
        let one = bdd.mk_leaf(true).unwrap();
        let b = bdd.mk_node(var('B'), zero, one).unwrap();
        let bad = bdd.mk_node(var('A'), bdd.retain(b), bdd.mk_leaf(true).unwrap()).unwrap();
        let bad = bdd.mk_node(var('B'), bad, bdd.mk_leaf(false).unwrap()).unwrap();

        let other = bdd.mk_var(var('A')).unwrap();
        let err = bdd.apply_and(bad, other).unwrap_err();
        assert!(matches!(err, BddError::Unordered { .. }));
    }

    #[test]
    fn test_release_node_frees_and_unregisters() {
        let bdd = bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let b = bdd.mk_var(var('B')).unwrap();
        let f = bdd.apply_and(a, b).unwrap();

        bdd.release_node(a);
        bdd.release_node(b);
        assert!(bdd.live_nodes() > 0);

        let freed = bdd.release_node(f);
        assert!(freed > 0);
        assert_eq!(bdd.live_nodes(), 0);
        assert!(bdd.table().is_empty());
    }

    #[test]
    fn test_release_keeps_shared_subtree() {
        let bdd = bdd("AB");
        let a = bdd.mk_var(var('A')).unwrap();
        let b = bdd.mk_var(var('B')).unwrap();
        let f = bdd.apply_or(a, b).unwrap();
        let (sub, _) = bdd.children(f).unwrap();
        let sub = bdd.retain(sub);

        bdd.release_node(a);
        bdd.release_node(b);
        bdd.release_node(f);

        assert_eq!(bdd.variable(sub), Some(var('B')));
        assert_eq!(bdd.size_of(sub), 1);
        assert_eq!(bdd.live_nodes(), 3);

        bdd.release_node(sub);
        assert_eq!(bdd.live_nodes(), 0);
    }

    #[test]
    fn test_set_root_releases_previous() {
        let bdd = bdd("A");
        let a = bdd.mk_var(var('A')).unwrap();
        bdd.set_root(a);
        assert_eq!(bdd.root(), Some(a));
        assert_eq!(bdd.size(), 1);

        let zero = bdd.mk_leaf(false).unwrap();
        bdd.set_root(zero);
        assert_eq!(bdd.live_nodes(), 1);
        assert_eq!(bdd.size(), 0);
    }

    #[test]
    fn test_out_of_memory_keeps_store_intact() {
        let config = BddConfig {
            storage_bits: 2,
            ..BddConfig::default()
        };
        let bdd = Bdd::with_config(VarOrder::parse("AB").unwrap(), &config).unwrap();
        let a = bdd.mk_var(var('A')).unwrap();
        assert_eq!(bdd.live_nodes(), 3);

        let err = bdd.mk_var(var('B')).unwrap_err();
        assert!(err.is_out_of_memory());
        assert_eq!(bdd.live_nodes(), 3);
        assert_eq!(bdd.table().len(), 1);

        let (low, high) = bdd.children(a).unwrap();
        let key = NodeKey::new(var('A'), low, high);
        assert_eq!(bdd.table().search(&key), Some(a));
    }

    #[test]
    fn test_invalid_config() {
        let order = VarOrder::parse("A").unwrap();
        for bits in [0, 32, 40] {
            let config = BddConfig::default().with_storage_bits(bits);
            let err = Bdd::with_config(order.clone(), &config).err().unwrap();
            assert!(matches!(
                err,
                BddError::InvalidConfig { field: "storage_bits", value } if value == bits
            ));
        }

        let config = BddConfig::default().with_initial_buckets(0);
        let err = Bdd::with_config(order.clone(), &config).err().unwrap();
        assert_eq!(err.to_string(), "invalid configuration: initial_buckets = 0");

        let config = BddConfig::default().with_storage_bits(31).with_initial_buckets(1);
        assert!(Bdd::with_config(order, &config).is_ok());
    }

    #[test]
    fn test_create_release_churn() {
        let bdd = bdd("A");
        for _ in 0..20_000 {
            let a = bdd.mk_var(var('A')).unwrap();
            bdd.release_node(a);
        }
        assert_eq!(bdd.live_nodes(), 0);
        let table = bdd.table();
        assert_eq!(table.num_buckets(), DEFAULT_BUCKETS);
        assert!(table.tombstones() < DEFAULT_BUCKETS);
    }

    #[test]
    fn test_op_eval() {
        assert!(Op::And.eval(true, true));
        assert!(!Op::And.eval(true, false));
        assert!(Op::Or.eval(false, true));
        assert!(!Op::Or.eval(false, false));
        assert_eq!(Op::And.to_string(), "and");
    }
}
