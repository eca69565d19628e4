//! Representation of propositional formulas over named atoms and opaque
//! non-propositional leaf expressions.

use std::fmt::Display;

use indexmap::IndexMap;
use quickcheck::{Arbitrary, Gen};

/// Leaf type for purely propositional formulas.
/// This type has no values, so a `Formula<NoExpr>` is guaranteed to contain no
/// non-propositional leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoExpr {}

/// A propositional formula.
/// A formula is inductively defined as follows:
/// - An atom (a named propositional variable) is a formula
/// - A non-propositional leaf expression of type `E` is a formula
/// - If `f` is a formula, then `¬f` ([Formula::Not]) is a formula
/// - If `f` and `g` are formulas, then `f ∧ g` ([Formula::And]), `f ∨ g`
///   ([Formula::Or]), `f → g` ([Formula::Impl]) and `f ↔ g` ([Formula::BiImpl])
///   are formulas
///
/// Non-propositional leaves are opaque to the engine: normalization replaces each
/// one with a synthetic atom and the results restore it. Purely propositional
/// formulas use the uninhabited [NoExpr] leaf type, which is the default.
///
/// The variant [Formula::Not] should not be used directly but instead the
/// constructor [Formula::not], which collapses double negations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula<E = NoExpr> {
    /// A named atom
    Atom(String),
    /// A non-propositional leaf expression
    Expr(E),
    /// A negation
    Not(Box<Formula<E>>),
    /// A conjunction
    And(Box<Formula<E>>, Box<Formula<E>>),
    /// A disjunction
    Or(Box<Formula<E>>, Box<Formula<E>>),
    /// An implication
    Impl(Box<Formula<E>>, Box<Formula<E>>),
    /// A bi-implication
    BiImpl(Box<Formula<E>>, Box<Formula<E>>),
}

impl<E> Formula<E> {
    /// Creates a new formula only consisting of a single named atom
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Creates a new formula only consisting of a single non-propositional leaf
    pub fn expr(expr: E) -> Self {
        Self::Expr(expr)
    }

    /// Creates the negation of the given formula.
    /// Flattens double negations.
    pub fn not(f: Formula<E>) -> Self {
        match f {
            Formula::Not(f) => *f,
            f => Self::Not(Box::new(f)),
        }
    }

    /// Creates the conjunction of the given formulas
    pub fn and(lhs: Formula<E>, rhs: Formula<E>) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the disjunction of the given formulas
    pub fn or(lhs: Formula<E>, rhs: Formula<E>) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the implication `lhs → rhs`
    pub fn implies(lhs: Formula<E>, rhs: Formula<E>) -> Self {
        Self::Impl(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the bi-implication `lhs ↔ rhs`
    pub fn iff(lhs: Formula<E>, rhs: Formula<E>) -> Self {
        Self::BiImpl(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluate the formula under the given atom values.
    /// Returns `None` if the given values are partial and the value of the
    /// formula depends on the missing assignments. Non-propositional leaves
    /// always evaluate to `None`; their truth value is not known to the engine.
    pub fn evaluate(&self, values: &IndexMap<String, bool>) -> Option<bool> {
        match self {
            Formula::Atom(name) => values.get(name).copied(),
            Formula::Expr(_) => None,
            Formula::Not(f) => f.evaluate(values).map(|v| !v),
            Formula::And(lhs, rhs) => match (lhs.evaluate(values), rhs.evaluate(values)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Formula::Or(lhs, rhs) => match (lhs.evaluate(values), rhs.evaluate(values)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            Formula::Impl(lhs, rhs) => match (lhs.evaluate(values), rhs.evaluate(values)) {
                (Some(false), _) | (_, Some(true)) => Some(true),
                (Some(true), Some(false)) => Some(false),
                _ => None,
            },
            Formula::BiImpl(lhs, rhs) => match (lhs.evaluate(values), rhs.evaluate(values)) {
                (Some(l), Some(r)) => Some(l == r),
                _ => None,
            },
        }
    }

    /// Counts the number of leaves in this formula.
    pub fn num_leaves(&self) -> usize {
        match self {
            Formula::Atom(_) | Formula::Expr(_) => 1,
            Formula::Not(f) => f.num_leaves(),
            Formula::And(lhs, rhs)
            | Formula::Or(lhs, rhs)
            | Formula::Impl(lhs, rhs)
            | Formula::BiImpl(lhs, rhs) => lhs.num_leaves() + rhs.num_leaves(),
        }
    }
}

/* Pretty Printing */

impl Display for NoExpr {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl<E: Display> Display for Formula<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Expr(e) => write!(f, "{}", e),
            Formula::Not(fm) => write!(f, "¬{}", fm),
            Formula::And(lhs, rhs) => write!(f, r"({} /\ {})", lhs, rhs),
            Formula::Or(lhs, rhs) => write!(f, r"({} \/ {})", lhs, rhs),
            Formula::Impl(lhs, rhs) => write!(f, "({} -> {})", lhs, rhs),
            Formula::BiImpl(lhs, rhs) => write!(f, "({} <-> {})", lhs, rhs),
        }
    }
}

/* Arbitrary */

impl Arbitrary for Formula<NoExpr> {
    fn arbitrary(g: &mut Gen) -> Self {
        fn atom_name(g: &mut Gen) -> String {
            let names = ["a", "b", "c", "d", "p", "q"];
            (*g.choose(&names).unwrap()).to_string()
        }
        if g.size() <= 1 {
            return Formula::atom(atom_name(g));
        }
        let mut smaller = Gen::new(g.size() / 2);
        match u8::arbitrary(g) % 8 {
            0 | 1 => Formula::atom(atom_name(g)),
            2 => Formula::not(Formula::arbitrary(&mut smaller)),
            3 => Formula::and(
                Formula::arbitrary(&mut smaller),
                Formula::arbitrary(&mut smaller),
            ),
            4 => Formula::or(
                Formula::arbitrary(&mut smaller),
                Formula::arbitrary(&mut smaller),
            ),
            5 => Formula::implies(
                Formula::arbitrary(&mut smaller),
                Formula::arbitrary(&mut smaller),
            ),
            6 | 7 => Formula::iff(
                Formula::arbitrary(&mut smaller),
                Formula::arbitrary(&mut smaller),
            ),
            _ => unreachable!(),
        }
    }
}
