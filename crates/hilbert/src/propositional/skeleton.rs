//! Propositional skeletons
//!
//! The skeleton of a formula replaces every maximal equality, relation or
//! quantified subformula by an atom. Atoms are numbered from 0 in order of
//! first appearance, left to right, and equal subformulas share an atom.

use super::Proposition;
use crate::fol::Formula;
use indexmap::IndexSet;

/// A propositional skeleton together with the subformula behind each atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    proposition: Proposition,
    atoms: Vec<Formula>,
}

impl Skeleton {
    /// Pair a proposition with an atom table
    ///
    /// Returns `None` if the proposition mentions an atom the table lacks.
    pub fn new(proposition: Proposition, atoms: Vec<Formula>) -> Option<Skeleton> {
        if proposition.atom_count() > atoms.len() {
            return None;
        }
        Some(Skeleton { proposition, atoms })
    }

    pub fn proposition(&self) -> &Proposition {
        &self.proposition
    }

    /// Subformula for each atom, indexed by atom number
    pub fn atoms(&self) -> &[Formula] {
        &self.atoms
    }

    /// Rebuild a first-order formula by replacing each atom with its subformula
    pub fn to_formula(&self) -> Formula {
        self.rebuild(&self.proposition)
    }

    fn rebuild(&self, proposition: &Proposition) -> Formula {
        match proposition {
            // atom_count() <= atoms.len() is checked on construction
            Proposition::Atom(i) => self.atoms[*i].clone(),
            Proposition::Not(p) => Formula::not(self.rebuild(p)),
            Proposition::Binary(op, p, q) => Formula::binary(*op, self.rebuild(p), self.rebuild(q)),
        }
    }
}

impl Formula {
    /// Compute the propositional skeleton of this formula
    pub fn propositional_skeleton(&self) -> Skeleton {
        let mut atoms = IndexSet::new();
        let proposition = abstract_formula(self, &mut atoms);
        Skeleton {
            proposition,
            atoms: atoms.into_iter().collect(),
        }
    }
}

fn abstract_formula(formula: &Formula, atoms: &mut IndexSet<Formula>) -> Proposition {
    match formula {
        Formula::Equality(..) | Formula::Relation(..) | Formula::Quantified(..) => {
            let (index, _) = atoms.insert_full(formula.clone());
            Proposition::Atom(index)
        }
        Formula::Not(f) => Proposition::Not(Box::new(abstract_formula(f, atoms))),
        Formula::Binary(op, f1, f2) => {
            let left = abstract_formula(f1, atoms);
            let right = abstract_formula(f2, atoms);
            Proposition::Binary(*op, Box::new(left), Box::new(right))
        }
    }
}
