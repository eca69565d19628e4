//! Enumeration of satisfying assignments and their extension to full models.

use indexmap::IndexSet;

use crate::{
    assign::{Model, PartialAssignment},
    atoms::AtomSet,
    normalize::Skeleton,
};

/// Enumerates the satisfying assignments of a skeleton.
///
/// Implementations return *partial* assignments: atoms left unassigned may take
/// either value. The contract has three parts:
/// - sound: every total extension of a returned assignment satisfies the skeleton
/// - complete: every satisfying total assignment extends one of the returned
///   assignments
/// - disjoint: no two returned assignments share an extension, i.e. they assign
///   opposite values to at least one common atom
///
/// Disjointness makes the model count derivable without expansion: a partial
/// assignment over `n` atoms covers exactly `2^(n - assigned)` models.
///
/// Every atom of the skeleton must be contained in `atoms`. The engine
/// guarantees this by collecting the ordering from the same skeleton it passes
/// here.
pub trait ModelEnumerator {
    fn satisfying_assignments(
        &mut self,
        skeleton: &Skeleton,
        atoms: &AtomSet,
    ) -> Vec<PartialAssignment>;
}

/// The built-in enumerator, a plain backtracking search.
///
/// The skeleton is evaluated three-valued under the growing assignment: once
/// the value is forced true the assignment is emitted as-is, once forced false
/// the branch is pruned, and while undetermined the search splits on the
/// lowest-positioned unassigned atom. Recursion depth is bounded by the atom
/// count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Backtracker;

impl ModelEnumerator for Backtracker {
    fn satisfying_assignments(
        &mut self,
        skeleton: &Skeleton,
        atoms: &AtomSet,
    ) -> Vec<PartialAssignment> {
        let mut found = Vec::new();
        let mut assignment = PartialAssignment::empty();
        search(skeleton, atoms, &mut assignment, &mut found);
        log::debug!("Backtracking search found {} partial assignments", found.len());
        found
    }
}

fn search(
    skeleton: &Skeleton,
    atoms: &AtomSet,
    assignment: &mut PartialAssignment,
    found: &mut Vec<PartialAssignment>,
) {
    match skeleton.evaluate(assignment, atoms) {
        Some(true) => found.push(*assignment),
        Some(false) => {}
        None => {
            if let Some(position) = (0..atoms.len()).find(|p| assignment.get(*p).is_none()) {
                assignment.set(position, true);
                search(skeleton, atoms, assignment, found);
                assignment.set(position, false);
                search(skeleton, atoms, assignment, found);
                assignment.unset(position);
            }
        }
    }
}

/// Extends every partial assignment to all of its full models over `n` atoms
/// and returns the duplicate-free model set. The extension is iterative,
/// counting through the value combinations of the free positions.
pub fn expand_models(partials: &[PartialAssignment], n: usize) -> IndexSet<Model> {
    let mut models = IndexSet::new();
    for partial in partials {
        let free: Vec<usize> = (0..n).filter(|p| partial.get(*p).is_none()).collect();
        let base = partial.value_bits();
        // u128 keeps the bound representable even with all 64 positions free
        for combination in 0u128..1u128 << free.len() {
            let mut bits = base;
            for (offset, position) in free.iter().enumerate() {
                if combination >> offset & 1 == 1 {
                    bits |= 1u64 << position;
                }
            }
            models.insert(Model::from_index(bits));
        }
    }
    models
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{formula::Formula, normalize::normalize};

    fn prepared(f: &Formula) -> (Skeleton, AtomSet) {
        let (skeleton, _) = normalize(f).unwrap();
        let atoms = AtomSet::collect(&skeleton);
        (skeleton, atoms)
    }

    fn model_indices(f: &Formula) -> Vec<u64> {
        let (skeleton, atoms) = prepared(f);
        let partials = Backtracker.satisfying_assignments(&skeleton, &atoms);
        let mut indices: Vec<u64> = expand_models(&partials, atoms.len())
            .into_iter()
            .map(|m| m.index())
            .collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn conjunction_has_one_model() {
        let f = Formula::and(Formula::atom("a"), Formula::atom("b"));
        assert_eq!(model_indices(&f), vec![0b11]);
    }

    #[test]
    fn forced_atom_leaves_others_free() {
        // Equivalent to `a`; b stays unassigned in the emitted partial and the
        // expansion covers both of its values.
        let f = Formula::or(
            Formula::atom("a"),
            Formula::and(Formula::atom("a"), Formula::atom("b")),
        );
        let (skeleton, atoms) = prepared(&f);
        let partials = Backtracker.satisfying_assignments(&skeleton, &atoms);
        assert_eq!(partials.len(), 1);
        assert_eq!(partials[0].assigned(), 1);
        assert_eq!(model_indices(&f), vec![0b01, 0b11]);
    }

    #[test]
    fn contradiction_has_no_assignments() {
        let f = Formula::and(Formula::atom("a"), Formula::not(Formula::atom("a")));
        let (skeleton, atoms) = prepared(&f);
        assert!(Backtracker
            .satisfying_assignments(&skeleton, &atoms)
            .is_empty());
    }

    #[test]
    fn excluded_middle_covers_every_model() {
        let f = Formula::or(Formula::atom("a"), Formula::not(Formula::atom("a")));
        assert_eq!(model_indices(&f), vec![0, 1]);
    }

    #[test]
    fn branches_are_disjoint() {
        let f = Formula::or(Formula::atom("a"), Formula::atom("b"));
        let (skeleton, atoms) = prepared(&f);
        let partials = Backtracker.satisfying_assignments(&skeleton, &atoms);
        // Disjoint partials cover each model exactly once
        let covered: usize = partials
            .iter()
            .map(|p| 1usize << (atoms.len() - p.assigned()))
            .sum();
        assert_eq!(covered, expand_models(&partials, atoms.len()).len());
    }
}
