//! Evaluation of a diagram under a complete assignment.
//!
//! An assignment is a string of `'0'`/`'1'` symbols, one per variable, positioned
//! according to the diagram's order: for order `"CAB"`, the assignment `"100"` means
//! `C = 1, A = 0, B = 0`.

use log::debug;

use crate::bdd::Bdd;
use crate::error::EvalError;
use crate::node::Node;
use crate::reference::NodeId;

impl Bdd {
    /// Evaluate the diagram from its root.
    ///
    /// The order is re-validated and the whole assignment is checked before the walk
    /// starts, so a malformed query never yields a boolean.
    pub fn evaluate(&self, assignment: &str) -> Result<bool, EvalError> {
        let root = self.root().ok_or(EvalError::EmptyDiagram)?;
        self.evaluate_node(root, assignment)
    }

    /// Evaluate the sub-diagram rooted at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not refer to a live node of this diagram.
    pub fn evaluate_node(&self, node: NodeId, assignment: &str) -> Result<bool, EvalError> {
        let bits = self.parse_assignment(assignment)?;
        self.evaluate_bits(node, &bits)
    }

    /// Validate an assignment string against the order and decode it.
    pub fn parse_assignment(&self, assignment: &str) -> Result<Vec<bool>, EvalError> {
        self.order().validate()?;

        let actual = assignment.chars().count();
        let expected = self.order().len();
        if actual != expected {
            return Err(EvalError::LengthMismatch { expected, actual });
        }

        assignment
            .chars()
            .enumerate()
            .map(|(pos, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(EvalError::InvalidSymbol { pos, ch }),
            })
            .collect()
    }

    /// Walk from `node` following the already decoded assignment.
    pub fn evaluate_bits(&self, node: NodeId, bits: &[bool]) -> Result<bool, EvalError> {
        if bits.len() != self.order().len() {
            return Err(EvalError::LengthMismatch {
                expected: self.order().len(),
                actual: bits.len(),
            });
        }

        let mut current = node;
        loop {
            match self.node(current) {
                Node::Leaf(value) => {
                    debug!("evaluate: reached leaf {} = {}", current, value as u8);
                    return Ok(value);
                }
                Node::Internal { variable, low, high } => {
                    let pos = self
                        .order()
                        .position(variable)
                        .ok_or(EvalError::UnknownVariable(variable))?;
                    current = if bits[pos] { high } else { low };
                }
            }
        }
    }
}
