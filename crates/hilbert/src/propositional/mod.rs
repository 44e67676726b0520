//! Propositional view of first-order formulas
//!
//! Tautology lines are checked by abstracting a formula to its propositional
//! skeleton and asking a [`TautologyOracle`] whether the skeleton is a
//! tautology.

pub mod oracle;
pub mod skeleton;

pub use oracle::{TautologyOracle, TruthTable};
pub use skeleton::Skeleton;

use crate::fol::Connective;
use std::fmt;

/// A propositional formula over numbered atoms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Proposition {
    Atom(usize),
    Not(Box<Proposition>),
    Binary(Connective, Box<Proposition>, Box<Proposition>),
}

impl Proposition {
    /// Number of atoms needed to evaluate this proposition (highest index + 1)
    pub fn atom_count(&self) -> usize {
        match self {
            Proposition::Atom(i) => i + 1,
            Proposition::Not(p) => p.atom_count(),
            Proposition::Binary(_, p, q) => p.atom_count().max(q.atom_count()),
        }
    }

    /// Evaluate under an assignment indexed by atom number
    ///
    /// Atoms outside the assignment are read as false.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        match self {
            Proposition::Atom(i) => assignment.get(*i).copied().unwrap_or(false),
            Proposition::Not(p) => !p.evaluate(assignment),
            Proposition::Binary(op, p, q) => {
                let left = p.evaluate(assignment);
                match op {
                    Connective::And => left && q.evaluate(assignment),
                    Connective::Or => left || q.evaluate(assignment),
                    Connective::Implies => !left || q.evaluate(assignment),
                }
            }
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Atom(i) => write!(f, "p{}", i),
            Proposition::Not(p) => write!(f, "~{}", p),
            Proposition::Binary(op, p, q) => write!(f, "({}{}{})", p, op, q),
        }
    }
}
