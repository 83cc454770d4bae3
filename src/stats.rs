//! Size and memory metrics of a diagram.

use std::fmt;
use std::mem::size_of;

use crate::bdd::Bdd;
use crate::types::Var;

/// Number of internal nodes of the full (unreduced) decision tree over `num_vars` variables.
pub fn full_tree_size(num_vars: usize) -> u128 {
    if num_vars >= 128 {
        return u128::MAX;
    }
    (1u128 << num_vars) - 1
}

/// Reduction of a diagram of `size` internal nodes against the full tree, in percent.
///
/// Clamped at zero for diagrams over no variables.
pub fn reduction_percent(size: usize, num_vars: usize) -> f64 {
    let full = full_tree_size(num_vars);
    if full == 0 {
        return 0.0;
    }
    (100.0 * (1.0 - size as f64 / full as f64)).max(0.0)
}

/// Further reduction of `best` relative to `baseline`, in percent.
pub fn extra_reduction_percent(baseline: usize, best: usize) -> f64 {
    if baseline == 0 {
        return 0.0;
    }
    100.0 * (1.0 - best as f64 / baseline as f64)
}

/// Summary of a diagram's size figures.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BddStats {
    pub num_vars: usize,
    /// Distinct internal nodes reachable from the root
    pub size: usize,
    /// Nodes allocated over the diagram's lifetime
    pub allocated: usize,
    /// Nodes currently alive
    pub live: usize,
    /// Estimated footprint in bytes
    pub memory: usize,
}

impl BddStats {
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.size, self.num_vars)
    }
}

impl fmt::Display for BddStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vars = {}, size = {} (full tree {}, {:.2}% reduction), allocated = {}, live = {}, memory = {} B",
            self.num_vars,
            self.size,
            full_tree_size(self.num_vars),
            self.reduction_percent(),
            self.allocated,
            self.live,
            self.memory
        )
    }
}

impl Bdd {
    /// Estimated memory footprint of the diagram in bytes: arena, store, order and the
    /// aggregate itself.
    pub fn estimated_memory(&self) -> usize {
        size_of::<Bdd>()
            + self.storage().memory_usage()
            + self.table().memory_usage()
            + self.order().len() * size_of::<Var>()
    }

    pub fn stats(&self) -> BddStats {
        BddStats {
            num_vars: self.order().len(),
            size: self.size(),
            allocated: self.num_nodes(),
            live: self.live_nodes(),
            memory: self.estimated_memory(),
        }
    }
}
