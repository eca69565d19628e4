use std::hash::Hash;
use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use num_bigint::BigUint;

use crate::{
    assign::MAX_ATOMS,
    atoms::AtomSet,
    canonical::canonicalize,
    clause::{Clause, ClauseKind, RawClause},
    duality,
    enumerate::{expand_models, Backtracker, ModelEnumerator},
    error::Error,
    formula::{Formula, NoExpr},
    hitting::{implicates_from, Berge, HittingSetSolver},
    minimize::{implicants_of, Minimizer, QuineMcCluskey},
    normalize::{normalize, AtomMap},
    options::Options,
};

/// The result of compiling a formula: its prime implicants, its prime
/// implicates, and the synthetic atoms introduced during normalization.
///
/// An unsatisfiable formula compiles to a single empty implicant and no
/// implicates; a tautology compiles to no implicants and a single empty
/// implicate. Every other formula yields at least one non-empty clause of
/// each kind.
pub struct Compilation<E = NoExpr> {
    prime_implicants: IndexSet<Clause<E>>,
    prime_implicates: IndexSet<Clause<E>>,
    synthetics: AtomMap<E>,
}

impl<E> Compilation<E> {
    /// The prime implicants of the compiled formula, canonically ordered and
    /// free of duplicates.
    pub fn prime_implicants(&self) -> &IndexSet<Clause<E>> {
        &self.prime_implicants
    }

    /// The prime implicates of the compiled formula, canonically ordered and
    /// free of duplicates.
    pub fn prime_implicates(&self) -> &IndexSet<Clause<E>> {
        &self.prime_implicates
    }

    /// The synthetic atom names introduced for non-propositional leaves,
    /// in order of introduction. Empty for purely propositional input.
    pub fn synthetic_atoms(&self) -> &IndexMap<String, E> {
        self.synthetics.mapping()
    }
}

/// The compilation engine.
/// The engine is the entry point of the crate. It takes a formula and computes
/// its prime implicants and prime implicates.
///
/// The pipeline normalizes the formula, enumerates its models, minimizes them
/// into the prime implicants, derives the prime implicates from those by
/// computing minimal hitting sets, and canonicalizes both results. Formulas
/// with more models than non-models are compiled through their negation, see
/// [Options::use_negation].
///
/// Model enumeration, minimization and hitting set computation are pluggable:
/// the built-in implementations can be swapped for others via the `with_*`
/// methods.
pub struct Compiler {
    options: Options,
    enumerator: Box<dyn ModelEnumerator>,
    minimizer: Box<dyn Minimizer>,
    hitting: Box<dyn HittingSetSolver>,
}

impl Compiler {
    /// Creates an engine with default options, using [Backtracker],
    /// [QuineMcCluskey], and [Berge].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            enumerator: Box::new(Backtracker),
            minimizer: Box::new(QuineMcCluskey),
            hitting: Box::new(Berge),
        }
    }

    /// Replaces the model enumerator.
    pub fn with_enumerator(mut self, enumerator: impl ModelEnumerator + 'static) -> Self {
        self.enumerator = Box::new(enumerator);
        self
    }

    /// Replaces the minimizer.
    pub fn with_minimizer(mut self, minimizer: impl Minimizer + 'static) -> Self {
        self.minimizer = Box::new(minimizer);
        self
    }

    /// Replaces the hitting set solver.
    pub fn with_hitting_solver(mut self, hitting: impl HittingSetSolver + 'static) -> Self {
        self.hitting = Box::new(hitting);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compiles the given formula into its prime implicants and prime
    /// implicates.
    ///
    /// Returns an error if an atom name is invalid, if the formula has more
    /// distinct atoms than [Options::max_atoms] permits, or if a swapped-in
    /// minimizer or hitting set solver misbehaves.
    pub fn compile<E>(&mut self, formula: &Formula<E>) -> Result<Compilation<E>, Error>
    where
        E: Clone + Eq + Hash,
    {
        let start = Instant::now();

        // Normalize and fix the atom ordering
        let (skeleton, map) = normalize(formula)?;
        let atoms = AtomSet::collect(&skeleton);
        log::debug!("Normalized formula: {}", skeleton);
        log::debug!("Atoms: {}", atoms);

        let limit = self.options.max_atoms.min(MAX_ATOMS);
        if atoms.len() > limit {
            return Err(Error::AtomLimit {
                count: atoms.len(),
                limit,
            });
        }
        let n = atoms.len();

        // Enumerate, and switch to the negation if it has fewer models
        let chosen = duality::choose(
            skeleton,
            &atoms,
            self.enumerator.as_mut(),
            self.options.use_negation,
        );

        // Early return for the degenerate formulas
        if chosen.count == BigUint::from(0u8) {
            log::info!("Formula is unsatisfiable");
            return Ok(Compilation {
                prime_implicants: canonicalize(vec![RawClause::empty(ClauseKind::Implicant)], &map),
                prime_implicates: IndexSet::new(),
                synthetics: map,
            });
        }
        if chosen.count == BigUint::from(1u8) << n {
            log::info!("Formula is a tautology");
            return Ok(Compilation {
                prime_implicants: IndexSet::new(),
                prime_implicates: canonicalize(vec![RawClause::empty(ClauseKind::Implicate)], &map),
                synthetics: map,
            });
        }

        let models = expand_models(&chosen.partials, n);
        log::info!("Enumerated {} models over {} atoms", models.len(), n);

        // Minimize into implicants, then derive the implicates by duality
        let implicants = implicants_of(self.minimizer.as_mut(), &models, &atoms)?;
        let implicates = implicates_from(self.hitting.as_mut(), &implicants, &atoms)?;

        let (implicants, implicates) = if chosen.negated {
            duality::undo(implicants, implicates)
        } else {
            (implicants, implicates)
        };

        let prime_implicants = canonicalize(implicants, &map);
        let prime_implicates = canonicalize(implicates, &map);
        log::info!(
            "Compiled {} prime implicants and {} prime implicates in {:?}",
            prime_implicants.len(),
            prime_implicates.len(),
            start.elapsed()
        );

        Ok(Compilation {
            prime_implicants,
            prime_implicates,
            synthetics: map,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles a formula with the default engine. See [Compiler::compile].
pub fn compile<E>(formula: &Formula<E>) -> Result<Compilation<E>, Error>
where
    E: Clone + Eq + Hash,
{
    Compiler::new().compile(formula)
}
