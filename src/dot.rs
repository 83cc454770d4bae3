//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Leaf nodes** are rendered as squares at the bottom (sink rank). Under
//!   [`LeafPolicy::Fresh`][crate::bdd::LeafPolicy::Fresh] several leaves may carry the
//!   same value; each one is drawn.
//! - **Internal nodes** are rendered as circles, grouped by their position in the order
//! - **Edges**:
//!   - Solid lines represent high (then) edges
//!   - Dashed lines represent low (else) edges
//! - **The root** is rendered as a rectangle at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use sop_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::build("AB+!C", "ABC").unwrap();
//! let dot = bdd.to_dot().unwrap();
//! assert!(dot.starts_with("graph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::NodeId;

/// Configuration options for DOT output generation.
///
/// # Examples
///
/// ```
/// use sop_bdd::bdd::Bdd;
/// use sop_bdd::dot::DotConfig;
///
/// let bdd = Bdd::build("A", "A").unwrap();
/// let config = DotConfig {
///     node_shape: "ellipse",
///     ..DotConfig::default()
/// };
/// let dot = bdd.to_dot_with_config(&config).unwrap();
/// assert!(dot.contains("shape=ellipse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for internal nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for leaf nodes (default: "square")
    pub leaf_shape: &'static str,
    /// Shape for the root marker (default: "rect")
    pub root_shape: &'static str,
    /// Style for high (then) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (else) edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Whether to show node ids next to variable names (default: false)
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            leaf_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            show_ids: false,
        }
    }
}

impl Bdd {
    /// Converts the diagram to DOT (Graphviz) format.
    ///
    /// An empty diagram (no root) yields an empty graph.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the diagram to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        let Some(root) = self.root() else {
            writeln!(dot, "}}")?;
            return Ok(dot);
        };

        let mut all_nodes: Vec<NodeId> = self.descendants([root]).into_iter().collect();
        all_nodes.sort();

        // Group internal nodes by order position for proper ranking
        let mut levels = BTreeMap::<usize, Vec<NodeId>>::new();
        let mut leaves = Vec::new();
        for &id in &all_nodes {
            match self.node(id) {
                Node::Leaf(value) => leaves.push((id, value)),
                Node::Internal { variable, .. } => {
                    let level = self.order().position(variable).unwrap_or(usize::MAX);
                    levels.entry(level).or_default().push(id);
                }
            }
        }

        writeln!(dot, "{{ rank=sink")?;
        for (id, value) in leaves {
            writeln!(
                dot,
                "{} [shape={}, label=\"{}\"];",
                id.raw(),
                config.leaf_shape,
                value as u8
            )?;
        }
        writeln!(dot, "}}")?;

        for level in levels.values() {
            writeln!(dot, "{{ rank=same")?;
            for &id in level {
                let Some(variable) = self.variable(id) else {
                    continue;
                };
                if config.show_ids {
                    writeln!(dot, "{} [label=\"{}{}\"];", id.raw(), variable, id)?;
                } else {
                    writeln!(dot, "{} [label=\"{}\"];", id.raw(), variable)?;
                }
            }
            writeln!(dot, "}}")?;
        }

        for &id in &all_nodes {
            let Some((low, high)) = self.children(id) else {
                continue;
            };
            writeln!(dot, "{} -- {} [style={}];", id.raw(), high.raw(), config.high_edge_style)?;
            writeln!(dot, "{} -- {} [style={}];", id.raw(), low.raw(), config.low_edge_style)?;
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape={}, label=\"{}\"];", config.root_shape, self.order())?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -- {};", root.raw())?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
