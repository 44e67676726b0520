//! Tautology oracles

use super::Proposition;
use crate::fol::Formula;

/// Decides whether a propositional formula is a tautology
pub trait TautologyOracle {
    fn is_tautology(&self, proposition: &Proposition) -> bool;

    /// Whether the propositional skeleton of `formula` is a tautology
    fn is_skeleton_tautology(&self, formula: &Formula) -> bool {
        self.is_tautology(formula.propositional_skeleton().proposition())
    }
}

/// Exhaustive truth-table evaluation
///
/// Exponential in the number of atoms; the skeletons of proof lines stay
/// small in practice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthTable;

impl TautologyOracle for TruthTable {
    fn is_tautology(&self, proposition: &Proposition) -> bool {
        let mut assignment = vec![false; proposition.atom_count()];
        loop {
            if !proposition.evaluate(&assignment) {
                return false;
            }
            if !advance(&mut assignment) {
                return true;
            }
        }
    }
}

impl<F> TautologyOracle for F
where
    F: Fn(&Proposition) -> bool,
{
    fn is_tautology(&self, proposition: &Proposition) -> bool {
        self(proposition)
    }
}

/// Step to the next assignment in binary counting order; false after the last
fn advance(assignment: &mut [bool]) -> bool {
    for bit in assignment.iter_mut() {
        if *bit {
            *bit = false;
        } else {
            *bit = true;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_tautology(s: &str) -> bool {
        TruthTable.is_skeleton_tautology(&Formula::parse(s).unwrap())
    }

    #[test]
    fn test_tautologies() {
        assert!(is_tautology("(R(x)|~R(x))"));
        assert!(is_tautology("(R(x)->(Q()->R(x)))"));
        assert!(is_tautology("((Ax[R(x)]->Q())->(~Q()->~Ax[R(x)]))"));
        assert!(is_tautology("(a=b->(b=c->(((b=c&a=b)->a=c)->a=c)))"));
    }

    #[test]
    fn test_non_tautologies() {
        assert!(!is_tautology("R(x)"));
        assert!(!is_tautology("(R(x)->R(y))"));
        // Only propositional structure counts
        assert!(!is_tautology("(Ax[R(x)]->R(c))"));
        assert!(!is_tautology("c=c"));
    }

    #[test]
    fn test_advance_enumerates_all_assignments() {
        let mut assignment = vec![false; 3];
        let mut count = 1;
        while advance(&mut assignment) {
            count += 1;
        }
        assert_eq!(count, 8);
        assert_eq!(assignment, vec![false; 3]);
    }
}
