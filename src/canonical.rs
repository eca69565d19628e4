//! Final canonicalization: literal ordering, structural deduplication, and
//! restoration of synthetic atoms to the expressions they stand for.

use std::hash::Hash;

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::{
    clause::{Clause, Leaf, Literal, RawClause},
    normalize::AtomMap,
};

/// Sorts each clause's literals by atom name, swaps synthetic atoms back for
/// their expressions, and deduplicates structurally, keeping the first-seen
/// instance. Sorting happens before restoration, so the literal order inside
/// a clause is determined by the names the pipeline computed with. The empty
/// degenerate clauses pass through untouched.
pub(crate) fn canonicalize<E: Clone + Eq + Hash>(
    raw: Vec<RawClause>,
    map: &AtomMap<E>,
) -> IndexSet<Clause<E>> {
    let mut clauses = IndexSet::new();
    for mut clause in raw {
        clause.literals.sort_by(|(a, _), (b, _)| a.cmp(b));
        let literals: SmallVec<[Literal<E>; 4]> = clause
            .literals
            .into_iter()
            .map(|(name, positive)| {
                let atom = match map.expr(&name) {
                    Some(expr) => Leaf::Expr(expr.clone()),
                    None => Leaf::Atom(name),
                };
                Literal { atom, positive }
            })
            .collect();
        clauses.insert(Clause::from_parts(clause.kind, literals));
    }
    clauses
}
