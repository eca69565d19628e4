//! Compilation of propositional formulas into their prime implicants and
//! prime implicates.
//!
//! A prime implicant is a minimal conjunction of literals that entails the
//! formula; a prime implicate is a minimal disjunction of literals entailed by
//! it. The engine computes both: it normalizes the input formula, enumerates
//! its models, minimizes them into the prime implicants, and derives the prime
//! implicates as minimal hitting sets of the implicants. Formulas that are
//! true in more than half of all assignments are compiled through their
//! negation and the results mapped back.
//!
//! Formulas may embed non-propositional leaf expressions of an arbitrary type;
//! these are treated as opaque atoms during compilation and restored in the
//! results.
//!
//! ```
//! use primeform::{compile, Formula};
//!
//! let f: Formula = Formula::and(Formula::atom("a"), Formula::atom("b"));
//! let compiled = compile(&f).unwrap();
//!
//! let implicants: Vec<_> = compiled
//!     .prime_implicants()
//!     .iter()
//!     .map(|c| c.to_string())
//!     .collect();
//! let implicates: Vec<_> = compiled
//!     .prime_implicates()
//!     .iter()
//!     .map(|c| c.to_string())
//!     .collect();
//! assert_eq!(implicants, ["a & b"]);
//! assert_eq!(implicates, ["a", "b"]);
//! ```

mod assign;
mod atoms;
mod canonical;
mod clause;
mod duality;
mod engine;
mod enumerate;
mod error;
mod formula;
mod hitting;
mod minimize;
mod normalize;
mod options;

pub use assign::{Model, PartialAssignment, MAX_ATOMS};
pub use atoms::AtomSet;
pub use clause::{Clause, ClauseKind, Leaf, Literal};
pub use engine::{compile, Compilation, Compiler};
pub use enumerate::{expand_models, Backtracker, ModelEnumerator};
pub use error::Error;
pub use formula::{Formula, NoExpr};
pub use hitting::{as_token, token_position, token_positive, Berge, HittingSetSolver, Token};
pub use minimize::{Minimizer, QuineMcCluskey};
pub use normalize::{normalize, AtomMap, Skeleton};
pub use options::Options;
