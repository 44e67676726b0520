//! Proof lines and their validity

use super::schema::{InstantiationError, InstantiationMap, Schema};
use crate::fol::{Formula, Quantifier};
use crate::propositional::TautologyOracle;
use indexmap::IndexSet;
use std::fmt;
use thiserror::Error;

/// Why a line is not justified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("assumption {0} is not in the assumption set")]
    UnknownAssumption(String),

    #[error("cannot instantiate assumption: {0}")]
    Instantiation(#[from] InstantiationError),

    #[error("instance {found} does not match instantiated assumption {expected}")]
    InstanceMismatch { expected: Formula, found: Formula },

    #[error("{0} is not a tautology")]
    NotTautology(Formula),

    #[error("line {line} references line {reference}, which is not earlier")]
    ForwardReference { line: usize, reference: usize },

    #[error("line {conditional} is not {expected}")]
    NotConditional { conditional: usize, expected: Formula },

    #[error("{formula} is not a universal generalization of line {predicate}")]
    NotGeneralization { formula: Formula, predicate: usize },
}

/// A justified line of a proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Instance of an assumption or axiom schema
    Assumption {
        formula: Formula,
        assumption: Schema,
        instantiation: InstantiationMap,
    },
    /// Formula whose propositional skeleton is a tautology
    Tautology { formula: Formula },
    /// `formula` from `antecedent` and `(antecedent->formula)` at `conditional`
    ModusPonens {
        formula: Formula,
        antecedent: usize,
        conditional: usize,
    },
    /// `Ax[P]` from `P` at `predicate`
    UniversalGeneralization { formula: Formula, predicate: usize },
}

impl Line {
    pub fn formula(&self) -> &Formula {
        match self {
            Line::Assumption { formula, .. }
            | Line::Tautology { formula }
            | Line::ModusPonens { formula, .. }
            | Line::UniversalGeneralization { formula, .. } => formula,
        }
    }

    /// Short name of the justification
    pub fn rule_name(&self) -> &'static str {
        match self {
            Line::Assumption { .. } => "Assumption",
            Line::Tautology { .. } => "Tautology",
            Line::ModusPonens { .. } => "MP",
            Line::UniversalGeneralization { .. } => "UG",
        }
    }

    /// Earlier lines this line depends on
    pub fn premises(&self) -> Vec<usize> {
        match self {
            Line::ModusPonens {
                antecedent,
                conditional,
                ..
            } => vec![*antecedent, *conditional],
            Line::UniversalGeneralization { predicate, .. } => vec![*predicate],
            _ => vec![],
        }
    }

    /// Copy of this line with every premise index moved by `offset`
    pub fn shifted(&self, offset: usize) -> Line {
        match self {
            Line::ModusPonens {
                formula,
                antecedent,
                conditional,
            } => Line::ModusPonens {
                formula: formula.clone(),
                antecedent: antecedent + offset,
                conditional: conditional + offset,
            },
            Line::UniversalGeneralization { formula, predicate } => Line::UniversalGeneralization {
                formula: formula.clone(),
                predicate: predicate + offset,
            },
            other => other.clone(),
        }
    }

    /// Check that this line, placed at `index`, is justified
    ///
    /// Only `lines[..index]` is consulted.
    pub fn check(
        &self,
        assumptions: &IndexSet<Schema>,
        lines: &[Line],
        index: usize,
        oracle: &dyn TautologyOracle,
    ) -> Result<(), LineError> {
        match self {
            Line::Assumption {
                formula,
                assumption,
                instantiation,
            } => {
                if !assumptions.contains(assumption) {
                    return Err(LineError::UnknownAssumption(assumption.to_string()));
                }
                let expected = assumption.instantiate(instantiation)?;
                if &expected != formula {
                    return Err(LineError::InstanceMismatch {
                        expected,
                        found: formula.clone(),
                    });
                }
                Ok(())
            }
            Line::Tautology { formula } => {
                if oracle.is_skeleton_tautology(formula) {
                    Ok(())
                } else {
                    Err(LineError::NotTautology(formula.clone()))
                }
            }
            Line::ModusPonens {
                formula,
                antecedent,
                conditional,
            } => {
                let antecedent = earlier(lines, index, *antecedent)?;
                let found = earlier(lines, index, *conditional)?;
                match found.as_implication() {
                    Some((p, q)) if p == antecedent && q == formula => Ok(()),
                    _ => Err(LineError::NotConditional {
                        conditional: *conditional,
                        expected: Formula::implies(antecedent.clone(), formula.clone()),
                    }),
                }
            }
            Line::UniversalGeneralization { formula, predicate } => {
                let body = earlier(lines, index, *predicate)?;
                match formula.as_quantified(Quantifier::Forall) {
                    Some((_, p)) if p == body => Ok(()),
                    _ => Err(LineError::NotGeneralization {
                        formula: formula.clone(),
                        predicate: *predicate,
                    }),
                }
            }
        }
    }

    pub fn is_valid(
        &self,
        assumptions: &IndexSet<Schema>,
        lines: &[Line],
        index: usize,
        oracle: &dyn TautologyOracle,
    ) -> bool {
        self.check(assumptions, lines, index, oracle).is_ok()
    }
}

/// Formula at `reference`, which must come before `index`
fn earlier(lines: &[Line], index: usize, reference: usize) -> Result<&Formula, LineError> {
    if reference < index {
        if let Some(line) = lines.get(reference) {
            return Ok(line.formula());
        }
    }
    Err(LineError::ForwardReference {
        line: index,
        reference,
    })
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Assumption {
                formula,
                assumption,
                instantiation,
            } => {
                write!(f, "{}    (Assumption {}", formula, assumption)?;
                if !instantiation.is_empty() {
                    write!(f, " instantiated with {}", instantiation)?;
                }
                write!(f, ")")
            }
            Line::Tautology { formula } => write!(f, "{}    (Tautology)", formula),
            Line::ModusPonens {
                formula,
                antecedent,
                conditional,
            } => write!(f, "{}    (MP from lines {} and {})", formula, antecedent, conditional),
            Line::UniversalGeneralization { formula, predicate } => {
                write!(f, "{}    (UG of line {})", formula, predicate)
            }
        }
    }
}
