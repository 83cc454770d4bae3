//! Debug utilities for inspecting diagram structure.
//!
//! This module provides helpers for exploring diagrams and checking their structural
//! invariants. These are primarily useful in tests and during development.

use std::collections::HashMap;
use std::fmt;

use crate::bdd::Bdd;
use crate::node::{Node, NodeKey};
use crate::reference::NodeId;
use crate::types::Var;

/// Detailed information about a single node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub id: NodeId,
    /// Variable at this node (None for leaves)
    pub variable: Option<Var>,
    /// Position of the variable in the order (None for leaves)
    pub level: Option<usize>,
    pub low: Option<NodeId>,
    pub high: Option<NodeId>,
    /// Leaf value (None for internal nodes)
    pub value: Option<bool>,
    pub ref_count: u32,
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.value, self.variable, self.low, self.high) {
            (Some(value), ..) => write!(f, "{} = {} (rc={})", self.id, value as u8, self.ref_count),
            (None, Some(variable), Some(low), Some(high)) => write!(
                f,
                "{}(var={}, level={}, low={}, high={}, rc={})",
                self.id,
                variable,
                self.level.map_or("?".to_string(), |l| l.to_string()),
                low,
                high,
                self.ref_count
            ),
            _ => write!(f, "{}(?)", self.id),
        }
    }
}

/// A violated structural invariant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Violation {
    /// Internal node whose children are the same node.
    Redundant { node: NodeId },
    /// Child testing a variable that is not strictly later in the order.
    OutOfOrder { node: NodeId, child: NodeId },
    /// Internal node testing a variable absent from the order.
    UnknownVariable { node: NodeId, variable: Var },
    /// Two reachable internal nodes with the same `(variable, low, high)` triple.
    Duplicate { node: NodeId, other: NodeId },
    /// Internal node the canonical store does not map back to itself.
    Unregistered { node: NodeId },
    /// Reachable node with a zero reference count.
    Dead { node: NodeId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Redundant { node } => write!(f, "{} has identical children", node),
            Violation::OutOfOrder { node, child } => {
                write!(f, "{} has child {} out of order", node, child)
            }
            Violation::UnknownVariable { node, variable } => {
                write!(f, "{} tests {} which is not in the order", node, variable)
            }
            Violation::Duplicate { node, other } => {
                write!(f, "{} duplicates {}", node, other)
            }
            Violation::Unregistered { node } => write!(f, "{} is not registered in the store", node),
            Violation::Dead { node } => write!(f, "{} is reachable but unreferenced", node),
        }
    }
}

impl Bdd {
    /// Get detailed information about a single node.
    pub fn node_info(&self, id: NodeId) -> NodeInfo {
        let ref_count = self.ref_count(id);
        match self.node(id) {
            Node::Leaf(value) => NodeInfo {
                id,
                variable: None,
                level: None,
                low: None,
                high: None,
                value: Some(value),
                ref_count,
            },
            Node::Internal { variable, low, high } => NodeInfo {
                id,
                variable: Some(variable),
                level: self.order().position(variable),
                low: Some(low),
                high: Some(high),
                value: None,
                ref_count,
            },
        }
    }

    /// Check the reduction, ordering and canonicality invariants of everything reachable
    /// from the root, returning all violations found.
    pub fn check_structure(&self) -> Vec<Violation> {
        match self.root() {
            Some(root) => self.check_structure_from(root),
            None => Vec::new(),
        }
    }

    pub fn check_structure_from(&self, root: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut nodes: Vec<NodeId> = self.descendants([root]).into_iter().collect();
        nodes.sort();

        let mut seen: HashMap<NodeKey, NodeId> = HashMap::new();

        for &id in &nodes {
            if !self.storage().is_occupied(id.index()) || self.ref_count(id) == 0 {
                violations.push(Violation::Dead { node: id });
                continue;
            }

            let Node::Internal { variable, low, high } = self.node(id) else {
                continue;
            };

            if low == high {
                violations.push(Violation::Redundant { node: id });
            }

            let Some(position) = self.order().position(variable) else {
                violations.push(Violation::UnknownVariable { node: id, variable });
                continue;
            };

            for child in [low, high] {
                if let Some(child_var) = self.variable(child) {
                    let in_order = self
                        .order()
                        .position(child_var)
                        .is_some_and(|p| p > position);
                    if !in_order {
                        violations.push(Violation::OutOfOrder { node: id, child });
                    }
                }
            }

            let key = NodeKey::new(variable, low, high);
            if let Some(&other) = seen.get(&key) {
                violations.push(Violation::Duplicate { node: id, other });
            } else {
                seen.insert(key, id);
            }

            if self.table().search(&key) != Some(id) {
                violations.push(Violation::Unregistered { node: id });
            }
        }

        violations
    }

    /// Compact nested rendering of the sub-diagram at `node`, e.g. `A(0, B(0, 1))`.
    pub fn to_bracket_string(&self, node: NodeId) -> String {
        let mut result = String::new();
        self.push_bracket(&mut result, node);
        result
    }

    fn push_bracket(&self, out: &mut String, node: NodeId) {
        match self.node(node) {
            Node::Leaf(value) => out.push(if value { '1' } else { '0' }),
            Node::Internal { variable, low, high } => {
                out.push(variable.to_char());
                out.push('(');
                self.push_bracket(out, low);
                out.push_str(", ");
                self.push_bracket(out, high);
                out.push(')');
            }
        }
    }

    /// Print a compact representation of the diagram.
    pub fn debug_string(&self) -> String {
        let Some(root) = self.root() else {
            return "BDD (empty)".to_string();
        };

        let mut nodes: Vec<NodeInfo> = self
            .descendants([root])
            .into_iter()
            .map(|id| self.node_info(id))
            .collect();
        nodes.sort_by_key(|n| (n.level.unwrap_or(usize::MAX), n.id));

        let mut lines = vec![format!(
            "BDD {} over '{}' ({} nodes):",
            root,
            self.order(),
            nodes.len()
        )];
        lines.extend(nodes.iter().map(|node| format!("  {}", node)));
        lines.join("\n") + "\n"
    }

    /// Verify that the diagram evaluates like `expected` on all assignments.
    ///
    /// Assignments are positional with respect to the order. Returns the mismatching
    /// assignments together with the expected value.
    pub fn verify_truth_table(&self, expected: impl Fn(&[bool]) -> bool) -> Vec<(Vec<bool>, bool)> {
        let Some(root) = self.root() else {
            return Vec::new();
        };

        let n = self.order().len();
        let mut failures = Vec::new();
        for bits in 0..(1u64 << n) {
            let assignment: Vec<bool> = (0..n).map(|i| (bits >> (n - 1 - i)) & 1 == 1).collect();
            let want = expected(&assignment);
            if self.evaluate_bits(root, &assignment) != Ok(want) {
                failures.push((assignment, want));
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ast::Expr;
    use crate::bdd::{BddConfig, LeafPolicy};
    use crate::order::VarOrder;
    use test_log::test;

    fn var(ch: char) -> Var {
        Var::from_char(ch).unwrap()
    }

    #[test]
    fn test_node_info() {
        let bdd = Bdd::build("A", "AB").unwrap();
        let root = bdd.root().unwrap();
        let info = bdd.node_info(root);
        assert_eq!(info.variable, Some(var('A')));
        assert_eq!(info.level, Some(0));
        assert_eq!(info.value, None);
        assert_eq!(info.ref_count, 1);

        let leaf = bdd.node_info(info.high.unwrap());
        assert_eq!(leaf.value, Some(true));
        assert!(leaf.to_string().contains("= 1"));
    }

    #[test]
    fn test_check_structure_of_built_diagrams() {
        for (expression, order) in [("AB+!C", "ABC"), ("A!B+C!D+BD", "DCBA"), ("C", "ABC"), ("", "A")] {
            let bdd = Bdd::build(expression, order).unwrap();
            assert_eq!(bdd.check_structure(), vec![], "{} under {}", expression, order);
            bdd.release();
        }
    }

    #[test]
    fn test_check_structure_detects_out_of_order() {
        let bdd = Bdd::new(VarOrder::parse("AB").unwrap()).unwrap();
        let a = bdd.mk_var(var('A')).unwrap();
        let zero = bdd.mk_leaf(false).unwrap();
        // B above A violates the order.
        let bad = bdd.mk_node(var('B'), zero, a).unwrap();
        bdd.set_root(bad);
        assert_eq!(
            bdd.check_structure(),
            vec![Violation::OutOfOrder { node: bad, child: a }]
        );
    }

    #[test]
    fn test_bracket_string() {
        let config = BddConfig {
            leaf_policy: LeafPolicy::Shared,
            ..BddConfig::default()
        };
        let bdd = Bdd::build_with_config("AB", "AB", &config).unwrap();
        assert_eq!(bdd.to_bracket_string(bdd.root().unwrap()), "A(0, B(0, 1))");

        let bdd = Bdd::build_with_config("AB+!C", "ABC", &config).unwrap();
        assert_eq!(
            bdd.to_bracket_string(bdd.root().unwrap()),
            "A(C(1, 0), B(C(1, 0), 1))"
        );
    }

    #[test]
    fn test_debug_string() {
        let bdd = Bdd::build("A", "A").unwrap();
        let s = bdd.debug_string();
        assert!(s.contains("var=A"), "Expected var=A in: {}", s);
        assert!(s.contains("level=0"), "Expected level=0 in: {}", s);
        assert!(s.starts_with("BDD "));
        assert!(s.ends_with('\n'));
        // Header plus the node testing A and its two leaves.
        assert_eq!(s.lines().count(), 4);

        let empty = Bdd::new(VarOrder::parse("A").unwrap()).unwrap();
        assert_eq!(empty.debug_string(), "BDD (empty)");
    }

    #[test]
    fn test_verify_truth_table() {
        let expr = Expr::parse("A!B+C").unwrap();
        let order = VarOrder::parse("CBA").unwrap();
        let bdd = Bdd::build("A!B+C", "CBA").unwrap();
        let failures = bdd.verify_truth_table(|values| expr.eval_with_order(&order, values));
        assert!(failures.is_empty(), "Truth table verification failed: {:?}", failures);

        let failures = bdd.verify_truth_table(|_| false);
        assert!(!failures.is_empty());
        bdd.release();
    }
}
