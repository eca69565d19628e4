//! Choice between compiling a formula or its negation, and the structural
//! mapping back.

use num_bigint::BigUint;

use crate::{
    assign::PartialAssignment, atoms::AtomSet, clause::RawClause, enumerate::ModelEnumerator,
    normalize::Skeleton,
};

/// The enumeration the pipeline continues with, together with the model count
/// of the original skeleton and the record of whether negation was applied.
pub(crate) struct Chosen {
    pub partials: Vec<PartialAssignment>,
    /// Model count of the original, un-negated skeleton.
    pub count: BigUint,
    pub negated: bool,
}

/// Counts the models covered by disjoint partial assignments over `n` atoms.
/// Each assignment covers `2^(n - assigned)` models, so no expansion happens.
pub(crate) fn count_models(partials: &[PartialAssignment], n: usize) -> BigUint {
    partials.iter().fold(BigUint::from(0u8), |acc, partial| {
        acc + (BigUint::from(1u8) << (n - partial.assigned()))
    })
}

/// Enumerates the skeleton and decides whether the pipeline operates on it or
/// on its negation. A formula with more than half of all `2^n` assignments as
/// models is more expensive to minimize than its negation; the results are
/// mapped back afterwards by [undo].
pub(crate) fn choose(
    skeleton: Skeleton,
    atoms: &AtomSet,
    enumerator: &mut dyn ModelEnumerator,
    use_negation: bool,
) -> Chosen {
    let n = atoms.len();
    let partials = enumerator.satisfying_assignments(&skeleton, atoms);
    let count = count_models(&partials, n);
    let half = BigUint::from(1u8) << (n - 1);

    if !(use_negation && count > half) {
        log::debug!("Compiling directly, {} of 2^{} assignments are models", count, n);
        return Chosen {
            partials,
            count,
            negated: false,
        };
    }

    log::debug!(
        "Compiling the negation, {} of 2^{} assignments are models",
        count,
        n
    );
    let negated = Skeleton::not(skeleton);
    let partials = enumerator.satisfying_assignments(&negated, atoms);
    Chosen {
        partials,
        count,
        negated: true,
    }
}

/// Maps the implicant and implicate lists computed for `¬f` back to `f`.
/// Negating every literal of an implicate of `¬f` yields an implicant of `f`,
/// and vice versa; the step is purely structural and re-invokes nothing.
pub(crate) fn undo(
    implicants: Vec<RawClause>,
    implicates: Vec<RawClause>,
) -> (Vec<RawClause>, Vec<RawClause>) {
    let restored_implicants = implicates.into_iter().map(RawClause::negated).collect();
    let restored_implicates = implicants.into_iter().map(RawClause::negated).collect();
    (restored_implicants, restored_implicates)
}
