const DEFAULT_MAX_ATOMS: usize = 16;
const DEFAULT_USE_NEGATION: bool = true;

#[derive(Debug, Clone)]
pub struct Options {
    /// The maximum number of distinct atoms a formula may use.
    /// Model enumeration and minimization are exponential in the atom count, so
    /// compilation refuses formulas above this limit before enumerating anything.
    /// Values above 64 are clamped to 64, the width of the truth-table bitmask.
    pub max_atoms: usize,
    /// Whether to compile the negation of the formula when the formula itself has
    /// more models than its negation. The results are mapped back afterwards, so
    /// this only changes cost, never output. Disabling it forces direct
    /// compilation, which is occasionally useful for debugging.
    pub use_negation: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_atoms: DEFAULT_MAX_ATOMS,
            use_negation: DEFAULT_USE_NEGATION,
        }
    }
}
