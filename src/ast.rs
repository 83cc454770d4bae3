//! Sum-of-products expressions.
//!
//! ```text
//! Expr    := Term ('+' Term)*
//! Term    := Literal+
//! Literal := ['!'] Variable
//! ```
//!
//! Juxtaposition is AND, `+` is OR, and `!` negates exactly the following variable.
//! The empty string is the constant-false expression (no terms).

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::ParseError;
use crate::order::VarOrder;
use crate::types::Var;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Literal {
    pub var: Var,
    pub negated: bool,
}

impl Literal {
    pub fn positive(var: Var) -> Self {
        Self { var, negated: false }
    }

    pub fn negative(var: Var) -> Self {
        Self { var, negated: true }
    }

    /// Value of the literal when its variable is `value`.
    pub fn eval(&self, value: bool) -> bool {
        value != self.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.var)
    }
}

/// Conjunction of literals.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Term {
    pub literals: Vec<Literal>,
}

impl Term {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn eval(&self, value: impl Fn(Var) -> bool) -> bool {
        self.literals.iter().all(|lit| lit.eval(value(lit.var)))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.literals {
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Disjunction of terms.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Expr {
    pub terms: Vec<Term>,
}

impl Expr {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = input.chars().collect();
        let mut terms = Vec::new();
        let mut literals = Vec::new();

        if chars.is_empty() {
            return Ok(Expr::default());
        }

        let mut pos = 0;
        while pos < chars.len() {
            match chars[pos] {
                '+' => {
                    if literals.is_empty() {
                        return Err(ParseError::EmptyTerm { pos });
                    }
                    terms.push(Term::new(std::mem::take(&mut literals)));
                }
                '!' => {
                    let var = chars
                        .get(pos + 1)
                        .and_then(|&ch| Var::from_char(ch))
                        .ok_or(ParseError::DanglingNegation { pos })?;
                    literals.push(Literal::negative(var));
                    pos += 1;
                }
                ch => {
                    let var = Var::from_char(ch).ok_or(ParseError::UnexpectedChar { pos, ch })?;
                    literals.push(Literal::positive(var));
                }
            }
            pos += 1;
        }

        if literals.is_empty() {
            return Err(ParseError::EmptyTerm { pos: chars.len() });
        }
        terms.push(Term::new(literals));

        Ok(Expr { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct variables of the expression, in alphabetical order.
    pub fn variables(&self) -> Vec<Var> {
        let mut vars: Vec<Var> = self
            .terms
            .iter()
            .flat_map(|t| t.literals.iter().map(|lit| lit.var))
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }

    /// Evaluate the expression directly, without building a diagram.
    pub fn eval(&self, value: impl Fn(Var) -> bool) -> bool {
        self.terms.iter().any(|t| t.eval(&value))
    }

    /// Evaluate under an assignment given positionally with respect to `order`.
    ///
    /// Variables missing from the order read as `false`.
    pub fn eval_with_order(&self, order: &VarOrder, assignment: &[bool]) -> bool {
        self.eval(|var| {
            order
                .position(var)
                .and_then(|i| assignment.get(i).copied())
                .unwrap_or(false)
        })
    }

    /// Generate a random DNF over the variables of `order`.
    ///
    /// Produces 1 to 4 terms of `1..=n/2+1` literals each, every literal negated with
    /// probability one half. An empty order yields the empty expression.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, order: &VarOrder) -> Self {
        let vars = order.vars();
        if vars.is_empty() {
            return Expr::default();
        }

        let num_terms = rng.random_range(1..=4);
        let terms = (0..num_terms)
            .map(|_| {
                let num_literals = rng.random_range(1..=vars.len() / 2 + 1);
                let literals = (0..num_literals)
                    .map(|_| Literal {
                        var: vars[rng.random_range(0..vars.len())],
                        negated: rng.random_bool(0.5),
                    })
                    .collect();
                Term::new(literals)
            })
            .collect();

        Expr { terms }
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", term)?;
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

    fn var(ch: char) -> Var {
        Var::from_char(ch).unwrap()
    }

    #[test]
    fn test_parse() {
        let expr = Expr::parse("AB+!C").unwrap();
        assert_eq!(
            expr,
            Expr::new(vec![
                Term::new(vec![Literal::positive(var('A')), Literal::positive(var('B'))]),
                Term::new(vec![Literal::negative(var('C'))]),
            ])
        );
        assert_eq!(expr.to_string(), "AB+!C");
    }

    #[test]
    fn test_parse_empty() {
        let expr: Expr = "".parse().unwrap();
        assert!(expr.is_empty());
        assert!(!expr.eval(|_| true));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Expr::parse("AB*C"),
            Err(ParseError::UnexpectedChar { pos: 2, ch: '*' })
        );
        assert_eq!(
            Expr::parse("A b"),
            Err(ParseError::UnexpectedChar { pos: 1, ch: ' ' })
        );
        assert_eq!(Expr::parse("AB!"), Err(ParseError::DanglingNegation { pos: 2 }));
        assert_eq!(Expr::parse("!!A"), Err(ParseError::DanglingNegation { pos: 0 }));
        assert_eq!(Expr::parse("!a"), Err(ParseError::DanglingNegation { pos: 0 }));
        assert_eq!(Expr::parse("A+"), Err(ParseError::EmptyTerm { pos: 2 }));
        assert_eq!(Expr::parse("+A"), Err(ParseError::EmptyTerm { pos: 0 }));
        assert_eq!(Expr::parse("A++B"), Err(ParseError::EmptyTerm { pos: 2 }));
    }

    #[test]
    fn test_variables() {
        let expr = Expr::parse("DB+!A+BD!C").unwrap();
        assert_eq!(
            expr.variables(),
            vec![var('A'), var('B'), var('C'), var('D')]
        );
    }

    #[test]
    fn test_eval() {
        let expr = Expr::parse("AB+!C").unwrap();
        let order = VarOrder::parse("ABC").unwrap();
        assert!(!expr.eval_with_order(&order, &[true, false, true]));
        assert!(expr.eval_with_order(&order, &[true, true, true]));
        assert!(expr.eval_with_order(&order, &[false, false, false]));
        assert!(!expr.eval_with_order(&order, &[false, true, true]));
    }

    #[test]
    fn test_eval_contradiction_in_term() {
        let expr = Expr::parse("A!A").unwrap();
        assert!(!expr.eval(|_| true));
        assert!(!expr.eval(|_| false));
    }

    #[test]
    fn test_random_expression_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let order = VarOrder::parse("ABCDEF").unwrap();
        for _ in 0..50 {
            let expr = Expr::random(&mut rng, &order);
            assert!((1..=4).contains(&expr.terms.len()));
            for term in &expr.terms {
                assert!((1..=4).contains(&term.literals.len()));
                assert!(term.literals.iter().all(|lit| order.contains(lit.var)));
            }
            // Printing and parsing back gives the same expression.
            assert_eq!(Expr::parse(&expr.to_string()).unwrap(), expr);
        }
    }
}
