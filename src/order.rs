//! Variable order.
//!
//! A [`VarOrder`] is the sequence of variables assigned to diagram levels: the node
//! created at recursion depth `d` tests `order[d]`. The order also provides the
//! variable → position map used to read assignments.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::OrderError;
use crate::types::{Level, Var, ALPHABET_SIZE};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VarOrder {
    vars: Vec<Var>,
    positions: [Option<usize>; ALPHABET_SIZE],
}

impl VarOrder {
    /// Parse an order string such as `"ABC"`.
    ///
    /// Every symbol must be a variable letter and no variable may repeat.
    pub fn parse(order: &str) -> Result<Self, OrderError> {
        let mut vars = Vec::with_capacity(order.len());
        for (pos, ch) in order.chars().enumerate() {
            let var = Var::from_char(ch).ok_or(OrderError::InvalidSymbol { pos, ch })?;
            vars.push(var);
        }
        Self::from_vars(vars)
    }

    /// Build an order from a sequence of distinct variables.
    pub fn from_vars(vars: impl IntoIterator<Item = Var>) -> Result<Self, OrderError> {
        let vars: Vec<Var> = vars.into_iter().collect();
        let positions = Self::position_map(&vars)?;
        Ok(Self { vars, positions })
    }

    fn position_map(vars: &[Var]) -> Result<[Option<usize>; ALPHABET_SIZE], OrderError> {
        let mut positions = [None; ALPHABET_SIZE];
        for (i, &var) in vars.iter().enumerate() {
            if positions[var.index()].replace(i).is_some() {
                return Err(OrderError::Duplicate(var));
            }
        }
        Ok(positions)
    }

    /// Re-check that the order is a set of alphabet variables and that the position map
    /// agrees with it.
    pub fn validate(&self) -> Result<(), OrderError> {
        let positions = Self::position_map(&self.vars)?;
        debug_assert_eq!(positions, self.positions);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The variable at `level`, or `None` past the end of the order.
    pub fn var_at(&self, level: Level) -> Option<Var> {
        self.vars.get(level.index()).copied()
    }

    /// Position (level) of `var` in the order.
    pub fn position(&self, var: Var) -> Option<usize> {
        self.positions[var.index()]
    }

    pub fn contains(&self, var: Var) -> bool {
        self.position(var).is_some()
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    /// Permute the order in place with a Fisher–Yates shuffle.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.vars.len()).rev() {
            let j = rng.random_range(0..=i);
            self.vars.swap(i, j);
        }
        for (i, var) in self.vars.iter().enumerate() {
            self.positions[var.index()] = Some(i);
        }
    }
}

impl FromStr for VarOrder {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VarOrder::parse(s)
    }
}

impl fmt::Display for VarOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.vars {
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    #[test]
    fn test_parse_order() {
        let order = VarOrder::parse("CAB").unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order.to_string(), "CAB");
        let [a, b, c] = ['A', 'B', 'C'].map(|ch| Var::from_char(ch).unwrap());
        assert_eq!(order.position(c), Some(0));
        assert_eq!(order.position(a), Some(1));
        assert_eq!(order.position(b), Some(2));
        assert_eq!(order.var_at(Level::new(0)), Some(c));
        assert_eq!(order.var_at(Level::new(3)), None);
        assert!(!order.contains(Var::from_char('D').unwrap()));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_empty_order() {
        let order: VarOrder = "".parse().unwrap();
        assert!(order.is_empty());
        assert_eq!(order.var_at(Level::new(0)), None);
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            VarOrder::parse("AbC"),
            Err(OrderError::InvalidSymbol { pos: 1, ch: 'b' })
        );
        assert_eq!(
            VarOrder::parse("AB1"),
            Err(OrderError::InvalidSymbol { pos: 2, ch: '1' })
        );
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            VarOrder::parse("ABA"),
            Err(OrderError::Duplicate(Var::from_char('A').unwrap()))
        );
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut order = VarOrder::parse("ABCDEFGH").unwrap();
        for _ in 0..20 {
            order.shuffle(&mut rng);
            assert!(order.validate().is_ok());
            let mut vars = order.vars().to_vec();
            vars.sort();
            assert_eq!(vars, VarOrder::parse("ABCDEFGH").unwrap().vars());
            for (i, &var) in order.vars().iter().enumerate() {
                assert_eq!(order.position(var), Some(i));
            }
        }
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let mut first = VarOrder::parse("ABCDEF").unwrap();
        let mut second = first.clone();
        first.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
        second.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
