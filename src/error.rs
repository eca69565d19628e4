use thiserror::Error;

/// Errors reported by the compilation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// An atom name in the input formula violates the naming contract.
    /// Atom names must be non-empty and must not contain `&`, `|`, `~`, or whitespace,
    /// since they travel through the minimizer's sum-of-products text.
    #[error("invalid atom name {name:?}: {reason}")]
    InvalidAtom { name: String, reason: &'static str },

    /// The formula uses more distinct atoms than the configured limit allows.
    /// Enumeration cost is exponential in the atom count, so this is checked before
    /// any model is enumerated.
    #[error("formula has {count} distinct atoms, limit is {limit}")]
    AtomLimit { count: usize, limit: usize },

    /// The minimizer returned sum-of-products text that does not parse over the
    /// formula's atoms. Carries the raw output for diagnosis.
    #[error("minimizer returned unusable output {raw:?}: {reason}")]
    MinimizerOutput { raw: String, reason: String },

    /// The hitting-set solver returned a token that occurs in none of its input sets.
    #[error("hitting-set solver returned foreign token {token}")]
    ForeignToken { token: i32 },
}
