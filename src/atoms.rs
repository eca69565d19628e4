//! Collection of the distinct atoms of a skeleton into a stable ordering.

use std::fmt::Display;

use indexmap::IndexSet;

use crate::normalize::Skeleton;

/// The distinct atoms of one compilation, in a fixed order.
/// An atom's position in this ordering is its bit position in every truth-table
/// index computed during the compilation, so the ordering is established once
/// and never changes while the compilation runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AtomSet {
    atoms: IndexSet<String>,
}

impl AtomSet {
    /// Gathers the distinct atom names of the skeleton.
    /// The order is first-visit, depth-first, left operand before right.
    pub fn collect(skeleton: &Skeleton) -> Self {
        let mut atoms = IndexSet::new();
        visit(skeleton, &mut atoms);
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The position of the given atom in the ordering.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.atoms.get_index_of(name)
    }

    /// The atom at the given position of the ordering.
    pub fn name(&self, position: usize) -> Option<&str> {
        self.atoms.get_index(position).map(String::as_str)
    }

    /// Iterates over the atoms in ordering position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(String::as_str)
    }
}

fn visit(skeleton: &Skeleton, atoms: &mut IndexSet<String>) {
    match skeleton {
        Skeleton::Atom(name) => {
            atoms.insert(name.clone());
        }
        Skeleton::Not(f) => visit(f, atoms),
        Skeleton::And(lhs, rhs) | Skeleton::Or(lhs, rhs) => {
            visit(lhs, atoms);
            visit(rhs, atoms);
        }
    }
}

/* Pretty Printing */

impl Display for AtomSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for atom in &self.atoms {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", atom)?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{formula::Formula, normalize::normalize};

    fn skeleton_of(f: &Formula) -> Skeleton {
        normalize(f).unwrap().0
    }

    #[test]
    fn collects_in_first_visit_order() {
        let f = Formula::or(
            Formula::and(Formula::atom("b"), Formula::atom("a")),
            Formula::not(Formula::atom("c")),
        );
        let atoms = AtomSet::collect(&skeleton_of(&f));
        let collected: Vec<_> = atoms.iter().collect();
        assert_eq!(collected, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicates_collapse() {
        let f = Formula::and(
            Formula::atom("a"),
            Formula::or(Formula::atom("b"), Formula::atom("a")),
        );
        let atoms = AtomSet::collect(&skeleton_of(&f));
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms.position("a"), Some(0));
        assert_eq!(atoms.position("b"), Some(1));
    }

    #[test]
    fn positions_and_names_are_inverse() {
        let f = Formula::and(Formula::atom("x"), Formula::atom("y"));
        let atoms = AtomSet::collect(&skeleton_of(&f));
        assert_eq!(atoms.name(0), Some("x"));
        assert_eq!(atoms.name(1), Some("y"));
        assert_eq!(atoms.position("y"), Some(1));
        assert_eq!(atoms.position("z"), None);
        assert_eq!(atoms.name(2), None);
    }
}
