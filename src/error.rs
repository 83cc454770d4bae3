//! Error types.
//!
//! Construction errors ([`BddError`]) and evaluation errors ([`EvalError`]) are kept
//! apart: evaluation never allocates, and its failures are about the query, not the
//! diagram.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::types::{Level, Var};

pub type Result<T, E = BddError> = std::result::Result<T, E>;

/// Malformed sum-of-products expression. Positions are character offsets.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("negation at position {pos} is not followed by a variable")]
    DanglingNegation { pos: usize },

    #[error("empty term at position {pos}")]
    EmptyTerm { pos: usize },
}

/// Invalid variable order string.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum OrderError {
    #[error("symbol {ch:?} at position {pos} is not a variable")]
    InvalidSymbol { pos: usize, ch: char },

    #[error("variable {0} occurs more than once in the order")]
    Duplicate(Var),
}

#[derive(Debug, Error)]
pub enum BddError {
    #[error("out of memory: {context}")]
    OutOfMemory { context: &'static str },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("variable {0} does not occur in the order")]
    UnknownVariable(Var),

    #[error("variable {variable} is out of order below level {level}")]
    Unordered { variable: Var, level: Level },

    #[error("invalid configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: usize },
}

impl BddError {
    pub(crate) fn oom(context: &'static str) -> impl FnOnce(TryReserveError) -> BddError {
        move |_| BddError::OutOfMemory { context }
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, BddError::OutOfMemory { .. })
    }
}

/// Rejected evaluation query.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EvalError {
    #[error("diagram has no root")]
    EmptyDiagram,

    #[error("assignment has {actual} values, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid variable order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("assignment symbol {ch:?} at position {pos} is not '0' or '1'")]
    InvalidSymbol { pos: usize, ch: char },

    #[error("variable {0} is tested by the diagram but missing from its order")]
    UnknownVariable(Var),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ParseError::UnexpectedChar { pos: 3, ch: '*' };
        assert_eq!(e.to_string(), "unexpected character '*' at position 3");

        let e: BddError = OrderError::Duplicate(Var::new(1)).into();
        assert_eq!(e.to_string(), "variable B occurs more than once in the order");

        let e = EvalError::LengthMismatch { expected: 3, actual: 2 };
        assert_eq!(e.to_string(), "assignment has 2 values, expected 3");
    }

    #[test]
    fn test_oom_mapping() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).map_err(BddError::oom("test")).unwrap_err();
        assert!(err.is_out_of_memory());
        assert_eq!(err.to_string(), "out of memory: test");
    }
}
