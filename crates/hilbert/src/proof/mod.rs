//! Proofs: assumption sets, justified lines and whole-proof verification

pub mod line;
pub mod schema;

pub use line::{Line, LineError};
pub use schema::{Binding, InstantiationError, InstantiationMap, Schema};

use crate::fol::Formula;
use crate::propositional::TautologyOracle;
use indexmap::IndexSet;
use std::fmt;
use thiserror::Error;

/// Why a proof does not verify
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("proof has no lines")]
    Empty,

    #[error("conclusion {conclusion} differs from the last line {last}")]
    ConclusionMismatch { conclusion: Formula, last: Formula },

    #[error("line {index} is invalid: {source}")]
    InvalidLine {
        index: usize,
        #[source]
        source: LineError,
    },
}

/// A finished proof of `conclusion` from `assumptions`
///
/// The assumption set includes the axiom schemas the proof relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub assumptions: IndexSet<Schema>,
    pub conclusion: Formula,
    pub lines: Vec<Line>,
}

impl Proof {
    pub fn new(assumptions: IndexSet<Schema>, conclusion: Formula, lines: Vec<Line>) -> Self {
        Proof {
            assumptions,
            conclusion,
            lines,
        }
    }

    /// Replay every line against the assumptions and the lines before it
    ///
    /// Reports the first failure.
    pub fn verify(&self, oracle: &dyn TautologyOracle) -> Result<(), VerificationError> {
        let last = self.lines.last().ok_or(VerificationError::Empty)?;
        if last.formula() != &self.conclusion {
            return Err(VerificationError::ConclusionMismatch {
                conclusion: self.conclusion.clone(),
                last: last.formula().clone(),
            });
        }
        for (index, line) in self.lines.iter().enumerate() {
            line.check(&self.assumptions, &self.lines, index, oracle)
                .map_err(|source| VerificationError::InvalidLine { index, source })?;
        }
        Ok(())
    }

    pub fn is_valid(&self, oracle: &dyn TautologyOracle) -> bool {
        self.verify(oracle).is_ok()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Proof of {} from assumptions/axioms:", self.conclusion)?;
        for assumption in &self.assumptions {
            writeln!(f, "  {}", assumption)?;
        }
        writeln!(f, "Lines:")?;
        for (index, line) in self.lines.iter().enumerate() {
            writeln!(f, "{:3}) {}", index, line)?;
        }
        write!(f, "QED")
    }
}
