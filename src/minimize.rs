//! Reduction of the enumerated models to prime-implicant clauses.

use indexmap::IndexSet;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::{
    assign::{positions_mask, Model},
    atoms::AtomSet,
    clause::{ClauseKind, RawClause},
    error::Error,
};

/// Reduces a boolean function, given as its true truth-table rows, to a
/// sum-of-products expression containing exactly the prime terms.
///
/// Text format: terms are separated by `|`, literals within a term by `&`, and
/// a `~` directly before an atom name negates it. Whitespace around separators
/// is ignored. Empty text means zero terms. Example: `a & ~b | c`.
///
/// Contract: the returned expression is logically equivalent to the function
/// given by `rows`, and every term is prime, i.e. no literal can be dropped
/// without the term covering a false row. The engine never calls this with
/// zero rows or with all `2^n` rows; those cases short-circuit earlier.
pub trait Minimizer {
    fn minimize(&mut self, rows: &[u64], atoms: &AtomSet) -> String;
}

/// Maps the models to sorted truth-table rows, runs the minimizer, and parses
/// its sum-of-products output into implicant clauses.
pub(crate) fn implicants_of(
    minimizer: &mut dyn Minimizer,
    models: &IndexSet<Model>,
    atoms: &AtomSet,
) -> Result<Vec<RawClause>, Error> {
    let mut rows: Vec<u64> = models.iter().map(Model::index).collect();
    rows.sort_unstable();
    let text = minimizer.minimize(&rows, atoms);
    log::trace!("Minimizer output: {}", text);
    parse_sop(&text, atoms)
}

/// Parses a sum-of-products expression into implicant clauses over the given
/// atoms. Violations of the text format are reported together with the raw
/// output, so a misbehaving minimizer can be diagnosed.
fn parse_sop(text: &str, atoms: &AtomSet) -> Result<Vec<RawClause>, Error> {
    let bad = |reason: String| Error::MinimizerOutput {
        raw: text.to_string(),
        reason,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let mut clauses = Vec::new();
    for term in trimmed.split('|') {
        let term = term.trim();
        if term.is_empty() {
            return Err(bad("empty term".to_string()));
        }
        let mut literals: SmallVec<[(String, bool); 4]> = SmallVec::new();
        for literal in term.split('&') {
            let literal = literal.trim();
            if literal.is_empty() {
                return Err(bad("empty literal".to_string()));
            }
            let (name, positive) = match literal.strip_prefix('~') {
                Some("") => return Err(bad("negation marker without an atom".to_string())),
                Some(name) => (name, false),
                None => (literal, true),
            };
            if atoms.position(name).is_none() {
                return Err(bad(format!("unknown atom {:?}", name)));
            }
            if literals.iter().any(|(n, _)| n == name) {
                return Err(bad(format!("duplicate atom {:?} in term", name)));
            }
            literals.push((name.to_string(), positive));
        }
        clauses.push(RawClause::new(ClauseKind::Implicant, literals));
    }
    Ok(clauses)
}

/// The built-in minimizer, a Quine–McCluskey implementation.
///
/// The merging phase runs to fixpoint and every term that survives a round
/// unmerged is prime. No cover selection follows: the complete prime set is
/// already logically equivalent to the input rows, which is what the
/// compilation needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuineMcCluskey;

/// A product term over the atom ordering. `cares` marks the atoms the term
/// constrains and `values` holds their required values; value bits of
/// unconstrained atoms are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Cube {
    values: u64,
    cares: u64,
}

impl Cube {
    /// Merges two terms that constrain the same atoms and differ in exactly
    /// one value, dropping the differing atom.
    fn merge(self, other: Cube) -> Option<Cube> {
        if self.cares != other.cares {
            return None;
        }
        let diff = self.values ^ other.values;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Cube {
            values: self.values & !diff,
            cares: self.cares & !diff,
        })
    }

    fn term_text(&self, atoms: &AtomSet) -> String {
        atoms
            .iter()
            .enumerate()
            .filter(|(position, _)| self.cares >> position & 1 == 1)
            .map(|(position, name)| {
                if self.values >> position & 1 == 1 {
                    name.to_string()
                } else {
                    format!("~{}", name)
                }
            })
            .join(" & ")
    }
}

impl Minimizer for QuineMcCluskey {
    fn minimize(&mut self, rows: &[u64], atoms: &AtomSet) -> String {
        let width = positions_mask(atoms.len());
        let mut current: IndexSet<Cube> = rows
            .iter()
            .map(|row| Cube {
                values: row & width,
                cares: width,
            })
            .collect();
        let mut primes: IndexSet<Cube> = IndexSet::new();

        // Each round merges all adjacent pairs; terms that take part in no
        // merge cannot grow further and are prime.
        while !current.is_empty() {
            let mut merged = vec![false; current.len()];
            let mut next: IndexSet<Cube> = IndexSet::new();
            for i in 0..current.len() {
                for j in i + 1..current.len() {
                    if let Some(cube) = current[i].merge(current[j]) {
                        next.insert(cube);
                        merged[i] = true;
                        merged[j] = true;
                    }
                }
            }
            for (i, cube) in current.iter().enumerate() {
                if !merged[i] {
                    primes.insert(*cube);
                }
            }
            current = next;
        }

        log::debug!("Merged {} rows into {} prime terms", rows.len(), primes.len());
        primes.iter().map(|cube| cube.term_text(atoms)).join(" | ")
    }
}
