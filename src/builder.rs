//! Building diagrams from sum-of-products expressions.
//!
//! Each literal becomes a one-variable diagram, literals of a term are folded with AND,
//! and terms are folded with OR, all through [`Bdd::apply`]. Intermediate results are
//! released as soon as they have been combined.

use log::{debug, info};

use crate::ast::{Expr, Literal, Term};
use crate::bdd::{Bdd, BddConfig, Op};
use crate::error::{BddError, Result};
use crate::node::Node;
use crate::order::VarOrder;
use crate::reference::NodeId;

impl Bdd {
    /// Build the diagram of `expression` under the variable order `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sop_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::build("AB+!C", "ABC").unwrap();
    /// assert_eq!(bdd.evaluate("101"), Ok(false));
    /// assert_eq!(bdd.evaluate("110"), Ok(true));
    /// bdd.release();
    /// ```
    pub fn build(expression: &str, order: &str) -> Result<Self> {
        Self::build_with_config(expression, order, &BddConfig::default())
    }

    pub fn build_with_config(expression: &str, order: &str, config: &BddConfig) -> Result<Self> {
        let expr = Expr::parse(expression)?;
        let order = VarOrder::parse(order)?;
        Self::from_expr(&expr, order, config)
    }

    /// Build the diagram of an already parsed expression.
    ///
    /// Every variable of `expr` must occur in `order`; extra order variables are allowed.
    pub fn from_expr(expr: &Expr, order: VarOrder, config: &BddConfig) -> Result<Self> {
        if let Some(var) = expr.variables().into_iter().find(|&v| !order.contains(v)) {
            return Err(BddError::UnknownVariable(var));
        }

        let bdd = Bdd::with_config(order, config)?;
        let root = bdd.mk_expr(expr)?;
        bdd.set_root(root);

        info!(
            "built '{}' under order '{}': size = {}, allocated = {}",
            expr,
            bdd.order(),
            bdd.size(),
            bdd.num_nodes()
        );
        Ok(bdd)
    }

    /// Diagram of a whole expression; the empty expression is the false leaf.
    pub fn mk_expr(&self, expr: &Expr) -> Result<NodeId> {
        let mut acc: Option<NodeId> = None;
        for term in &expr.terms {
            let node = match self.mk_term(term) {
                Ok(node) => node,
                Err(e) => {
                    if let Some(acc) = acc {
                        self.release_node(acc);
                    }
                    return Err(e);
                }
            };
            acc = Some(self.fold(Op::Or, acc, node)?);
        }

        match acc {
            Some(node) => Ok(node),
            None => self.mk_leaf(false),
        }
    }

    /// Diagram of a conjunction of literals; the empty term is the true leaf.
    pub fn mk_term(&self, term: &Term) -> Result<NodeId> {
        debug!("mk_term({})", term);

        let mut acc: Option<NodeId> = None;
        for &lit in &term.literals {
            let node = match self.mk_literal(lit) {
                Ok(node) => node,
                Err(e) => {
                    if let Some(acc) = acc {
                        self.release_node(acc);
                    }
                    return Err(e);
                }
            };
            acc = Some(self.fold(Op::And, acc, node)?);
        }

        match acc {
            Some(node) => Ok(node),
            None => self.mk_leaf(true),
        }
    }

    /// One-variable diagram of a literal.
    ///
    /// A negated literal is obtained by re-canonicalizing the positive one with its
    /// children swapped.
    pub fn mk_literal(&self, lit: Literal) -> Result<NodeId> {
        let node = self.mk_var(lit.var)?;
        if !lit.negated {
            return Ok(node);
        }

        let negated = match self.node(node) {
            Node::Internal { variable, low, high } => {
                self.retain(low);
                self.retain(high);
                self.mk_node(variable, high, low)
            }
            Node::Leaf(value) => self.mk_leaf(!value),
        };
        self.release_node(node);
        negated
    }

    /// Combine the accumulator with `next`, giving back both inputs.
    fn fold(&self, op: Op, acc: Option<NodeId>, next: NodeId) -> Result<NodeId> {
        let Some(acc) = acc else {
            return Ok(next);
        };
        let result = self.apply(op, acc, next);
        self.release_node(acc);
        self.release_node(next);
        result
    }
}
