//! Variable-order search.
//!
//! # Why ordering matters
//!
//! The size of a diagram is highly sensitive to the variable order. For
//! `f = A₁B₁ + A₂B₂ + … + AₙBₙ` the interleaved order `A₁B₁A₂B₂…` gives a diagram
//! linear in `n`, while `A₁A₂…AₙB₁B₂…Bₙ` gives one exponential in `n`.
//!
//! Finding the optimal order is NP-complete, so instead of an exhaustive search over
//! all `n!` permutations a bounded number of random orders is tried:
//!
//! 1. Build the diagram under the alphabetical order of the referenced variables.
//! 2. Repeat `n` times (`n` = number of referenced variables): shuffle the order with
//!    Fisher–Yates, rebuild from scratch, and keep the candidate only when its size is
//!    strictly smaller than the best so far. Rejected candidates are released at once.
//!
//! Diagram size here is [`Bdd::size`], the number of distinct reachable internal nodes.
//! Because the first candidate is kept unless beaten, the result is never larger than
//! the diagram under the alphabetical order.
//!
//! The shuffle draws from a caller-supplied generator, so a seeded generator makes the
//! search reproducible.

use std::fmt;

use log::{debug, info};
use rand::Rng;

use crate::ast::Expr;
use crate::bdd::{Bdd, BddConfig};
use crate::error::Result;
use crate::order::VarOrder;

/// Statistics collected during order search.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReorderStats {
    /// Number of shuffled orders tried (the baseline not included)
    pub trials: usize,
    /// Number of trials that produced a strictly smaller diagram
    pub improvements: usize,
    /// Size of the diagram under the alphabetical order
    pub initial_size: usize,
    /// Size of the retained diagram
    pub best_size: usize,
}

impl ReorderStats {
    /// Calculate the size reduction ratio.
    pub fn reduction_ratio(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        1.0 - (self.best_size as f64 / self.initial_size as f64)
    }

    /// Calculate the percentage reduction.
    pub fn reduction_percent(&self) -> f64 {
        self.reduction_ratio() * 100.0
    }
}

impl fmt::Display for ReorderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trials, {} improvements, size {} -> {} ({:.1}%)",
            self.trials,
            self.improvements,
            self.initial_size,
            self.best_size,
            self.reduction_percent()
        )
    }
}

impl Bdd {
    /// Alphabetical order of the variables referenced by `expr`.
    pub fn default_order(expr: &Expr) -> Result<VarOrder> {
        Ok(VarOrder::from_vars(expr.variables())?)
    }

    /// Build the diagram of `expression` under the smallest order found by the search.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use sop_bdd::bdd::Bdd;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(42);
    /// let bdd = Bdd::build_with_best_order("AD+BE+CF", &mut rng).unwrap();
    /// let baseline = Bdd::build("AD+BE+CF", "ABCDEF").unwrap();
    /// assert!(bdd.size() <= baseline.size());
    /// ```
    pub fn build_with_best_order<R: Rng + ?Sized>(expression: &str, rng: &mut R) -> Result<Self> {
        let expr = Expr::parse(expression)?;
        let (bdd, _) = Self::search_order(&expr, &BddConfig::default(), rng)?;
        Ok(bdd)
    }

    /// Run the order search for `expr`, returning the retained diagram and statistics.
    pub fn search_order<R: Rng + ?Sized>(
        expr: &Expr,
        config: &BddConfig,
        rng: &mut R,
    ) -> Result<(Self, ReorderStats)> {
        let mut order = Self::default_order(expr)?;
        let mut best = Self::from_expr(expr, order.clone(), config)?;

        let mut stats = ReorderStats {
            initial_size: best.size(),
            best_size: best.size(),
            ..Default::default()
        };
        debug!("search_order: baseline '{}' with size {}", order, stats.initial_size);

        for trial in 0..order.len() {
            order.shuffle(rng);
            stats.trials += 1;

            let candidate = match Self::from_expr(expr, order.clone(), config) {
                Ok(candidate) => candidate,
                Err(e) => {
                    best.release();
                    return Err(e);
                }
            };

            let size = candidate.size();
            if size < stats.best_size {
                info!(
                    "search_order: trial {} improved size {} -> {} with order '{}'",
                    trial, stats.best_size, size, order
                );
                stats.best_size = size;
                stats.improvements += 1;
                std::mem::replace(&mut best, candidate).release();
            } else {
                debug!(
                    "search_order: trial {} rejected order '{}' with size {}",
                    trial, order, size
                );
                candidate.release();
            }
        }

        info!("search_order: best order '{}', {}", best.order(), stats);
        Ok((best, stats))
    }
}
