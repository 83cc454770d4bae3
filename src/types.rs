//! Type-safe wrappers for BDD variables and levels.
//!
//! Variables are single upper-case letters `A`..`Z`, levels are positions in the
//! variable order (depth in the diagram). Keeping them apart prevents mixing up
//! "which variable" with "where in the order".

use std::fmt;

/// Number of symbols in the variable alphabet (`A`..=`Z`).
pub const ALPHABET_SIZE: usize = 26;

/// A variable identifier: one letter from the alphabet `A`..=`Z`.
///
/// # Invariants
///
/// - The wrapped value is always in `0..ALPHABET_SIZE` (`A` = 0).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u8);

impl Var {
    /// Creates a variable from its letter, or `None` if `ch` is not in `A`..=`Z`.
    pub fn from_char(ch: char) -> Option<Self> {
        if ch.is_ascii_uppercase() {
            Some(Var(ch as u8 - b'A'))
        } else {
            None
        }
    }

    /// Creates a variable from its index in the alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ALPHABET_SIZE`.
    pub fn new(index: usize) -> Self {
        assert!(index < ALPHABET_SIZE, "Variable index must be < {}", ALPHABET_SIZE);
        Var(index as u8)
    }

    /// Returns the index of the variable in the alphabet (`A` = 0).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the letter of the variable.
    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.to_char()
    }
}

/// A level in the variable ordering (0-indexed).
///
/// Level 0 is the root level; a node created at recursion depth `d` tests the variable
/// at level `d` of the order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(usize);

impl Level {
    /// Creates a new level with the given index.
    pub fn new(index: usize) -> Self {
        Level(index)
    }

    /// Returns the raw level index as a `usize`.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the next level down (index + 1).
    pub fn next(self) -> Self {
        Level(self.0 + 1)
    }

    /// Checks if this is the top level (level 0).
    pub fn is_top(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<usize> for Level {
    fn from(index: usize) -> Self {
        Level(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_var_from_char() {
        let a = Var::from_char('A').unwrap();
        let z = Var::from_char('Z').unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(z.index(), 25);
        assert_eq!(a.to_char(), 'A');
        assert_eq!(z.to_string(), "Z");
        assert!(a < z);
    }

    #[test]
    fn test_var_rejects_other_symbols() {
        assert_eq!(Var::from_char('a'), None);
        assert_eq!(Var::from_char('!'), None);
        assert_eq!(Var::from_char('0'), None);
    }

    #[test]
    #[should_panic(expected = "Variable index must be < 26")]
    fn test_var_out_of_alphabet_panics() {
        Var::new(26);
    }

    #[test]
    fn test_level_navigation() {
        let l0 = Level::new(0);
        let l1 = l0.next();
        assert_eq!(l1.index(), 1);
        assert!(l0.is_top());
        assert!(!l1.is_top());
        assert_eq!(l1.to_string(), "L1");
    }
}
