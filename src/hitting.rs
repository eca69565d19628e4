//! Derivation of prime implicates as minimal hitting sets of the prime
//! implicants.

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::{
    atoms::AtomSet,
    clause::{ClauseKind, RawClause},
    error::Error,
};

/// A signed literal over the atom ordering: the atom at position `i` is
/// encoded as `i + 1`, negated by sign.
pub type Token = i32;

/// Encodes an atom position and polarity as a token.
pub fn as_token(position: usize, positive: bool) -> Token {
    let token = (position + 1) as i32;
    if positive {
        token
    } else {
        -token
    }
}

/// The atom position a token refers to.
pub fn token_position(token: Token) -> usize {
    (token.unsigned_abs() - 1) as usize
}

/// Whether a token carries positive polarity.
pub fn token_positive(token: Token) -> bool {
    token > 0
}

/// Computes every minimal hitting set of a family of token sets.
///
/// A hitting set intersects every set of the family; it is minimal if no
/// proper subset is also a hitting set. The contract: the returned family
/// contains every minimal hitting set exactly once and no member that is a
/// strict superset of another. The empty family has the empty set as its sole
/// minimal hitting set.
pub trait HittingSetSolver {
    fn minimal_hitting_sets(&mut self, sets: &[Vec<Token>]) -> Vec<Vec<Token>>;
}

/// Encodes the implicant clauses as token sets, runs the hitting-set solver,
/// and decodes the minimal hitting sets into implicate clauses.
pub(crate) fn implicates_from(
    solver: &mut dyn HittingSetSolver,
    implicants: &[RawClause],
    atoms: &AtomSet,
) -> Result<Vec<RawClause>, Error> {
    let sets: Vec<Vec<Token>> = implicants
        .iter()
        .map(|clause| {
            clause
                .literals
                .iter()
                .map(|(name, positive)| encode(name, *positive, atoms))
                .collect()
        })
        .collect();

    let hits = solver.minimal_hitting_sets(&sets);
    log::debug!(
        "{} minimal hitting sets over {} implicant sets",
        hits.len(),
        sets.len()
    );

    let universe: IndexSet<Token> = sets.iter().flatten().copied().collect();
    let mut implicates = Vec::new();
    for hit in hits {
        for &token in &hit {
            if !universe.contains(&token) {
                return Err(Error::ForeignToken { token });
            }
        }
        // A hitting set holding both polarities of one atom decodes to a
        // tautological clause; tautologies are entailed by every formula and
        // are never prime, so they are dropped here.
        if hit.iter().any(|&token| hit.contains(&-token)) {
            continue;
        }
        let literals = hit.iter().map(|&token| decode(token, atoms)).collect();
        implicates.push(RawClause::new(ClauseKind::Implicate, literals));
    }
    Ok(implicates)
}

fn encode(name: &str, positive: bool, atoms: &AtomSet) -> Token {
    match atoms.position(name) {
        Some(position) => as_token(position, positive),
        None => unreachable!("implicant atom {} is outside the collected ordering", name),
    }
}

fn decode(token: Token, atoms: &AtomSet) -> (String, bool) {
    match atoms.name(token_position(token)) {
        Some(name) => (name.to_string(), token_positive(token)),
        None => unreachable!("token {} passed validation against the implicant sets", token),
    }
}

/// The built-in hitting-set solver.
///
/// Berge's procedure: fold in one set at a time, crossing the running family
/// of minimal hitting sets with the new set and pruning non-minimal members
/// after each step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Berge;

impl HittingSetSolver for Berge {
    fn minimal_hitting_sets(&mut self, sets: &[Vec<Token>]) -> Vec<Vec<Token>> {
        let mut family: Vec<SmallVec<[Token; 4]>> = vec![SmallVec::new()];
        for set in sets {
            let mut crossed: Vec<SmallVec<[Token; 4]>> = Vec::new();
            for hit in &family {
                if set.iter().any(|token| hit.contains(token)) {
                    crossed.push(hit.clone());
                } else {
                    for &token in set {
                        let mut grown = hit.clone();
                        grown.push(token);
                        grown.sort_unstable();
                        crossed.push(grown);
                    }
                }
            }
            family = prune(crossed);
        }
        family.into_iter().map(SmallVec::into_vec).collect()
    }
}

/// Keeps only the minimal members of the family: duplicates and strict
/// supersets are dropped.
fn prune(mut family: Vec<SmallVec<[Token; 4]>>) -> Vec<SmallVec<[Token; 4]>> {
    family.sort_by_key(SmallVec::len);
    let mut kept: Vec<SmallVec<[Token; 4]>> = Vec::new();
    for candidate in family {
        if !kept.iter().any(|small| is_subset(small, &candidate)) {
            kept.push(candidate);
        }
    }
    kept
}

/// Both slices must be sorted ascending.
fn is_subset(small: &[Token], large: &[Token]) -> bool {
    small.iter().all(|token| large.binary_search(token).is_ok())
}

#[cfg(test)]
mod test {
    use smallvec::smallvec;

    use super::*;
    use crate::{formula::Formula, normalize::normalize};

    fn atoms_of(names: &[&str]) -> AtomSet {
        let mut f: Formula = Formula::atom(names[0]);
        for name in &names[1..] {
            f = Formula::and(f, Formula::atom(*name));
        }
        let (skeleton, _) = normalize(&f).unwrap();
        AtomSet::collect(&skeleton)
    }

    fn sorted(mut hits: Vec<Vec<Token>>) -> Vec<Vec<Token>> {
        hits.sort();
        hits
    }

    #[test]
    fn token_encoding_roundtrip() {
        for (position, positive) in [(0, true), (0, false), (5, true), (5, false)] {
            let token = as_token(position, positive);
            assert_eq!(token_position(token), position);
            assert_eq!(token_positive(token), positive);
        }
        assert_eq!(as_token(0, true), 1);
        assert_eq!(as_token(2, false), -3);
    }

    #[test]
    fn single_set_splits_into_singletons() {
        let hits = Berge.minimal_hitting_sets(&[vec![1, 2]]);
        assert_eq!(sorted(hits), vec![vec![1], vec![2]]);
    }

    #[test]
    fn singleton_sets_force_their_union() {
        let hits = Berge.minimal_hitting_sets(&[vec![1], vec![2]]);
        assert_eq!(sorted(hits), vec![vec![1, 2]]);
    }

    #[test]
    fn supersets_are_pruned() {
        let hits = Berge.minimal_hitting_sets(&[vec![1, 2], vec![1]]);
        assert_eq!(sorted(hits), vec![vec![1]]);
    }

    #[test]
    fn empty_family_has_the_empty_hitting_set() {
        let hits = Berge.minimal_hitting_sets(&[]);
        assert_eq!(hits, vec![Vec::<Token>::new()]);
    }

    #[test]
    fn unhittable_empty_set_yields_nothing() {
        let hits = Berge.minimal_hitting_sets(&[vec![1, 2], vec![]]);
        assert!(hits.is_empty());
    }

    #[test]
    fn opposite_polarities_stay_distinct_tokens() {
        // {-1, -2} and {1, 2} admit four minimal hitting sets, two of them
        // pairing a token with its negation
        let hits = Berge.minimal_hitting_sets(&[vec![-1, -2], vec![1, 2]]);
        assert_eq!(
            sorted(hits),
            vec![vec![-2, 1], vec![-2, 2], vec![-1, 1], vec![-1, 2]]
        );
    }

    #[test]
    fn driver_decodes_polarity() {
        let atoms = atoms_of(&["a", "b"]);
        let implicants = vec![RawClause::new(
            ClauseKind::Implicant,
            smallvec![("a".to_string(), true), ("b".to_string(), false)],
        )];
        let implicates = implicates_from(&mut Berge, &implicants, &atoms).unwrap();
        assert_eq!(
            implicates,
            vec![
                RawClause::new(ClauseKind::Implicate, smallvec![("a".to_string(), true)]),
                RawClause::new(ClauseKind::Implicate, smallvec![("b".to_string(), false)]),
            ]
        );
    }

    #[test]
    fn driver_drops_tautological_hitting_sets() {
        // Implicants of a <-> b; the hitting sets pairing an atom with its own
        // negation must not surface as implicates
        let atoms = atoms_of(&["a", "b"]);
        let implicants = vec![
            RawClause::new(
                ClauseKind::Implicant,
                smallvec![("a".to_string(), false), ("b".to_string(), false)],
            ),
            RawClause::new(
                ClauseKind::Implicant,
                smallvec![("a".to_string(), true), ("b".to_string(), true)],
            ),
        ];
        let implicates = implicates_from(&mut Berge, &implicants, &atoms).unwrap();
        assert_eq!(implicates.len(), 2);
        for implicate in &implicates {
            let names: Vec<_> = implicate.literals.iter().map(|(n, _)| n.clone()).collect();
            assert_eq!(names.len(), 2);
            assert_ne!(names[0], names[1]);
        }
    }

    struct Alien;

    impl HittingSetSolver for Alien {
        fn minimal_hitting_sets(&mut self, _sets: &[Vec<Token>]) -> Vec<Vec<Token>> {
            vec![vec![99]]
        }
    }

    #[test]
    fn foreign_tokens_are_rejected() {
        let atoms = atoms_of(&["a"]);
        let implicants = vec![RawClause::new(
            ClauseKind::Implicant,
            smallvec![("a".to_string(), true)],
        )];
        let err = implicates_from(&mut Alien, &implicants, &atoms).unwrap_err();
        assert!(matches!(err, Error::ForeignToken { token: 99 }));
    }
}
