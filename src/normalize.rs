//! Normalization of input formulas into the propositional skeleton the rest of
//! the pipeline operates on.

use std::fmt::Display;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::{
    assign::PartialAssignment,
    atoms::AtomSet,
    error::Error,
    formula::{Formula, NoExpr},
};

/// A normalized formula. Only atoms, negation, conjunction and disjunction
/// remain; implications and bi-implications have been rewritten away and every
/// non-propositional leaf has been replaced by a synthetic atom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skeleton {
    /// A named atom, either caller-supplied or synthetic
    Atom(String),
    /// A negation
    Not(Box<Skeleton>),
    /// A conjunction
    And(Box<Skeleton>, Box<Skeleton>),
    /// A disjunction
    Or(Box<Skeleton>, Box<Skeleton>),
}

impl Skeleton {
    /// Creates the negation of the given skeleton.
    /// Flattens double negations.
    pub fn not(f: Skeleton) -> Self {
        match f {
            Skeleton::Not(f) => *f,
            f => Self::Not(Box::new(f)),
        }
    }

    /// Creates the conjunction of the given skeletons
    pub fn and(lhs: Skeleton, rhs: Skeleton) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the disjunction of the given skeletons
    pub fn or(lhs: Skeleton, rhs: Skeleton) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluate the skeleton under a partial assignment over the given atom
    /// ordering. Returns `None` if the assignment leaves the value undetermined.
    pub fn evaluate(&self, assignment: &PartialAssignment, atoms: &AtomSet) -> Option<bool> {
        match self {
            Skeleton::Atom(name) => atoms.position(name).and_then(|pos| assignment.get(pos)),
            Skeleton::Not(f) => f.evaluate(assignment, atoms).map(|v| !v),
            Skeleton::And(lhs, rhs) => {
                match (lhs.evaluate(assignment, atoms), rhs.evaluate(assignment, atoms)) {
                    (Some(false), _) | (_, Some(false)) => Some(false),
                    (Some(true), Some(true)) => Some(true),
                    _ => None,
                }
            }
            Skeleton::Or(lhs, rhs) => {
                match (lhs.evaluate(assignment, atoms), rhs.evaluate(assignment, atoms)) {
                    (Some(true), _) | (_, Some(true)) => Some(true),
                    (Some(false), Some(false)) => Some(false),
                    _ => None,
                }
            }
        }
    }
}

/// The bidirectional mapping between synthetic atoms and the non-propositional
/// expressions they replaced. Scoped to a single compilation; the naming
/// counter lives here rather than in any shared state.
#[derive(Clone, Debug)]
pub struct AtomMap<E = NoExpr> {
    by_name: IndexMap<String, E>,
    by_expr: IndexMap<E, String>,
    /// Atom names used by the input formula; synthetic names skip these.
    taken: IndexSet<String>,
    counter: usize,
}

impl<E: Clone + Eq + Hash> AtomMap<E> {
    fn new(taken: IndexSet<String>) -> Self {
        Self {
            by_name: IndexMap::new(),
            by_expr: IndexMap::new(),
            taken,
            counter: 0,
        }
    }

    /// Returns the synthetic atom standing for `expr`, minting a fresh name the
    /// first time the expression is seen. Structurally equal expressions share
    /// one synthetic atom. Names count up from `C1` and skip any name the input
    /// formula already uses.
    fn fresh(&mut self, expr: &E) -> String {
        if let Some(name) = self.by_expr.get(expr) {
            return name.clone();
        }
        let name = loop {
            self.counter += 1;
            let candidate = format!("C{}", self.counter);
            if !self.taken.contains(&candidate) {
                break candidate;
            }
        };
        self.by_name.insert(name.clone(), expr.clone());
        self.by_expr.insert(expr.clone(), name.clone());
        name
    }
}

impl<E> AtomMap<E> {
    /// The expression the given synthetic atom stands for, if any.
    pub fn expr(&self, name: &str) -> Option<&E> {
        self.by_name.get(name)
    }

    /// Synthetic atom names and their expressions, in introduction order.
    pub fn mapping(&self) -> &IndexMap<String, E> {
        &self.by_name
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Rewrites a formula into its propositional skeleton.
///
/// `Impl(a,b)` becomes `Or(Not(a), b)` and `BiImpl(a,b)` becomes
/// `And(Or(Not(a),b), Or(Not(b),a))`. Every non-propositional leaf is replaced
/// by a synthetic atom recorded in the returned [AtomMap]. Atom names are
/// validated here, before any other work uses them.
pub fn normalize<E: Clone + Eq + Hash>(
    formula: &Formula<E>,
) -> Result<(Skeleton, AtomMap<E>), Error> {
    // Collect the caller's atom names first so synthetic names can skip all of
    // them, including names only occurring later in the tree.
    let mut names = IndexSet::new();
    collect_names(formula, &mut names)?;
    let mut map = AtomMap::new(names);
    let skeleton = rewrite(formula, &mut map);
    Ok((skeleton, map))
}

fn collect_names<E>(formula: &Formula<E>, names: &mut IndexSet<String>) -> Result<(), Error> {
    match formula {
        Formula::Atom(name) => {
            validate_name(name)?;
            names.insert(name.clone());
            Ok(())
        }
        Formula::Expr(_) => Ok(()),
        Formula::Not(f) => collect_names(f, names),
        Formula::And(lhs, rhs)
        | Formula::Or(lhs, rhs)
        | Formula::Impl(lhs, rhs)
        | Formula::BiImpl(lhs, rhs) => {
            collect_names(lhs, names)?;
            collect_names(rhs, names)
        }
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidAtom {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    for c in name.chars() {
        let reason = match c {
            '&' => "contains '&'",
            '|' => "contains '|'",
            '~' => "contains '~'",
            c if c.is_whitespace() => "contains whitespace",
            _ => continue,
        };
        return Err(Error::InvalidAtom {
            name: name.to_string(),
            reason,
        });
    }
    Ok(())
}

fn rewrite<E: Clone + Eq + Hash>(formula: &Formula<E>, map: &mut AtomMap<E>) -> Skeleton {
    match formula {
        Formula::Atom(name) => Skeleton::Atom(name.clone()),
        Formula::Expr(e) => Skeleton::Atom(map.fresh(e)),
        Formula::Not(f) => Skeleton::not(rewrite(f, map)),
        Formula::And(lhs, rhs) => Skeleton::and(rewrite(lhs, map), rewrite(rhs, map)),
        Formula::Or(lhs, rhs) => Skeleton::or(rewrite(lhs, map), rewrite(rhs, map)),
        Formula::Impl(lhs, rhs) => {
            Skeleton::or(Skeleton::not(rewrite(lhs, map)), rewrite(rhs, map))
        }
        Formula::BiImpl(lhs, rhs) => {
            let lhs = rewrite(lhs, map);
            let rhs = rewrite(rhs, map);
            Skeleton::and(
                Skeleton::or(Skeleton::not(lhs.clone()), rhs.clone()),
                Skeleton::or(Skeleton::not(rhs), lhs),
            )
        }
    }
}

/* Pretty Printing */

impl Display for Skeleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skeleton::Atom(name) => write!(f, "{}", name),
            Skeleton::Not(fm) => write!(f, "¬{}", fm),
            Skeleton::And(lhs, rhs) => write!(f, r"({} /\ {})", lhs, rhs),
            Skeleton::Or(lhs, rhs) => write!(f, r"({} \/ {})", lhs, rhs),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn atom(name: &str) -> Skeleton {
        Skeleton::Atom(name.to_string())
    }

    #[test]
    fn rewrites_implication() {
        let f: Formula = Formula::implies(Formula::atom("a"), Formula::atom("b"));
        let (skeleton, map) = normalize(&f).unwrap();
        assert_eq!(skeleton, Skeleton::or(Skeleton::not(atom("a")), atom("b")));
        assert!(map.is_empty());
    }

    #[test]
    fn rewrites_biimplication() {
        let f: Formula = Formula::iff(Formula::atom("a"), Formula::atom("b"));
        let (skeleton, _) = normalize(&f).unwrap();
        let expected = Skeleton::and(
            Skeleton::or(Skeleton::not(atom("a")), atom("b")),
            Skeleton::or(Skeleton::not(atom("b")), atom("a")),
        );
        assert_eq!(skeleton, expected);
    }

    #[test]
    fn synthesizes_atoms_for_expressions() {
        let f: Formula<String> = Formula::and(
            Formula::expr("x > 0".to_string()),
            Formula::or(Formula::expr("y < 2".to_string()), Formula::atom("a")),
        );
        let (skeleton, map) = normalize(&f).unwrap();
        let expected = Skeleton::and(atom("C1"), Skeleton::or(atom("C2"), atom("a")));
        assert_eq!(skeleton, expected);
        assert_eq!(map.expr("C1"), Some(&"x > 0".to_string()));
        assert_eq!(map.expr("C2"), Some(&"y < 2".to_string()));
    }

    #[test]
    fn equal_expressions_share_a_synthetic_atom() {
        let f: Formula<String> = Formula::or(
            Formula::expr("x > 0".to_string()),
            Formula::expr("x > 0".to_string()),
        );
        let (skeleton, map) = normalize(&f).unwrap();
        assert_eq!(skeleton, Skeleton::or(atom("C1"), atom("C1")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn synthetic_names_skip_user_atoms() {
        // The formula already uses "C1", so the expression gets "C2" even
        // though "C1" only occurs to the right of it.
        let f: Formula<String> = Formula::and(
            Formula::expr("x > 0".to_string()),
            Formula::atom("C1"),
        );
        let (skeleton, map) = normalize(&f).unwrap();
        assert_eq!(skeleton, Skeleton::and(atom("C2"), atom("C1")));
        assert_eq!(map.expr("C2"), Some(&"x > 0".to_string()));
        assert_eq!(map.expr("C1"), None);
    }

    #[test]
    fn rejects_invalid_atom_names() {
        for bad in ["", "a&b", "a|b", "~a", "a b", "a\tb"] {
            let f: Formula = Formula::atom(bad);
            assert!(
                matches!(normalize(&f), Err(Error::InvalidAtom { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn evaluates_three_valued() {
        let f: Formula = Formula::and(Formula::atom("a"), Formula::atom("b"));
        let (skeleton, _) = normalize(&f).unwrap();
        let atoms = AtomSet::collect(&skeleton);

        let mut pa = PartialAssignment::empty();
        assert_eq!(skeleton.evaluate(&pa, &atoms), None);
        pa.set(0, false);
        assert_eq!(skeleton.evaluate(&pa, &atoms), Some(false));
        pa.set(0, true);
        assert_eq!(skeleton.evaluate(&pa, &atoms), None);
        pa.set(1, true);
        assert_eq!(skeleton.evaluate(&pa, &atoms), Some(true));
    }
}
