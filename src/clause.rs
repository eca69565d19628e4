//! The clause data model shared by prime implicants and prime implicates.

use std::fmt::Display;

use smallvec::SmallVec;

use crate::formula::NoExpr;

/// Distinguishes a clause used as a prime implicant from one used as a prime
/// implicate. The kind participates in equality: an implicant and an implicate
/// with identical literals are distinct values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// A conjunction of literals that entails the formula
    Implicant,
    /// A disjunction of literals entailed by the formula
    Implicate,
}

impl ClauseKind {
    /// Returns the other kind.
    pub fn dual(self) -> Self {
        match self {
            ClauseKind::Implicant => ClauseKind::Implicate,
            ClauseKind::Implicate => ClauseKind::Implicant,
        }
    }
}

/// The atom of a restored literal: either a named atom of the input formula or
/// a non-propositional expression restored from its synthetic atom.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Leaf<E = NoExpr> {
    /// A caller-supplied named atom
    Atom(String),
    /// A restored non-propositional expression
    Expr(E),
}

/// An atom together with a required truth value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal<E = NoExpr> {
    pub atom: Leaf<E>,
    pub positive: bool,
}

/// A kind-tagged sequence of literals with no duplicate atoms, held in the
/// canonical order established by the canonicalization step (sorted by atom
/// name prior to restoring synthetic atoms). Equality and hash are derived
/// from the kind and that canonical sequence, so two clauses built from the
/// same literals in any insertion order compare equal once canonicalized.
///
/// A clause is never empty except in the degenerate cases: an unsatisfiable
/// formula compiles to a single empty implicant (denoting `false` itself) and
/// a tautology to a single empty implicate (denoting `true`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause<E = NoExpr> {
    kind: ClauseKind,
    literals: SmallVec<[Literal<E>; 4]>,
}

impl<E> Clause<E> {
    pub(crate) fn from_parts(kind: ClauseKind, literals: SmallVec<[Literal<E>; 4]>) -> Self {
        Self { kind, literals }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn literals(&self) -> &[Literal<E>] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal<E>> {
        self.literals.iter()
    }
}

/// A clause over plain atom names, the working currency of the pipeline before
/// synthetic atoms are restored. Literal order is arbitrary until the
/// canonicalization step sorts it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawClause {
    pub kind: ClauseKind,
    pub literals: SmallVec<[(String, bool); 4]>,
}

impl RawClause {
    pub fn new(kind: ClauseKind, literals: SmallVec<[(String, bool); 4]>) -> Self {
        Self { kind, literals }
    }

    pub fn empty(kind: ClauseKind) -> Self {
        Self {
            kind,
            literals: SmallVec::new(),
        }
    }

    /// Negates every literal and flips the kind. Maps a clause computed for
    /// `¬f` to the corresponding clause of `f`.
    pub fn negated(self) -> Self {
        Self {
            kind: self.kind.dual(),
            literals: self
                .literals
                .into_iter()
                .map(|(name, positive)| (name, !positive))
                .collect(),
        }
    }
}

/* Pretty Printing */

impl<E: Display> Display for Leaf<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leaf::Atom(name) => write!(f, "{}", name),
            Leaf::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl<E: Display> Display for Literal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "~{}", self.atom)
        }
    }
}

impl<E: Display> Display for Clause<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.literals.is_empty() {
            // The empty implicant denotes the unsatisfiable formula, the empty
            // implicate the tautological one.
            return match self.kind {
                ClauseKind::Implicant => write!(f, "false"),
                ClauseKind::Implicate => write!(f, "true"),
            };
        }
        let sep = match self.kind {
            ClauseKind::Implicant => " & ",
            ClauseKind::Implicate => " | ",
        };
        let mut first = true;
        for lit in &self.literals {
            if !first {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", lit)?;
            first = false;
        }
        Ok(())
    }
}
