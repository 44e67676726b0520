//! Quantifier rules and tautological folding
//!
//! Every rule here is a fixed expansion into primitive steps: axiom
//! instances (UI, ES), modus ponens, universal generalization and
//! tautologies.

use super::{Axiom, Prover, ProverError};
use crate::fol::names::is_variable;
use crate::fol::{Formula, Quantifier, Substitution, Term, Variable};
use crate::proof::InstantiationMap;
use std::collections::HashSet;
use tracing::trace;

/// `predicate` with the free occurrences of `variable` replaced by the placeholder
fn parametrize(predicate: &Formula, variable: &Variable) -> Result<Formula, ProverError> {
    Ok(predicate.substitute(
        &Substitution::single(variable.name.clone(), Term::placeholder()),
        &HashSet::new(),
    )?)
}

impl Prover {
    /// Derive `P[x:=t]` from `Ax[P]` at `line`
    ///
    /// Instantiates UI with `R := P[x:=_]`, `x := x`, `c := t`, then applies
    /// modus ponens.
    pub fn add_universal_instantiation(
        &mut self,
        instantiation: Formula,
        line: usize,
        term: Term,
    ) -> Result<usize, ProverError> {
        trace!(goal = %instantiation, line, term = %term, "universal instantiation");
        Prover::reject_placeholder(&instantiation)?;
        Prover::reject_placeholder_term(&term)?;
        let quantified = self.formula_at(line)?.clone();
        let (variable, predicate) = match quantified.as_quantified(Quantifier::Forall) {
            Some(parts) => parts,
            None => {
                return Err(ProverError::UnexpectedShape {
                    line,
                    expected: "universally quantified",
                    formula: quantified.clone(),
                })
            }
        };
        let expected = predicate.substitute(
            &Substitution::single(variable.name.clone(), term.clone()),
            &HashSet::new(),
        )?;
        if expected != instantiation {
            return Err(ProverError::Mismatch {
                expected,
                found: instantiation,
            });
        }
        let map = InstantiationMap::new()
            .formula("R", parametrize(predicate, variable)?)
            .variable("x", variable.name.clone())
            .term("c", term);
        let axiom_instance = Formula::implies(quantified.clone(), instantiation.clone());

        self.transaction(|prover| {
            let ui = prover.add_instantiated_assumption(
                axiom_instance,
                Axiom::UniversalInstantiation.schema(),
                map,
            )?;
            prover.add_mp(instantiation, line, ui)
        })
    }

    /// Derive `implication` from the formulas at `lines` by propositional logic
    ///
    /// Appends the tautology `(f(l1)->(f(l2)->...->(f(ln)->implication)))`,
    /// with the lines in the given order, then discharges `l1`, `l2`, ... in
    /// that same order by modus ponens. The same call always appends the
    /// same lines.
    pub fn add_tautological_implication(
        &mut self,
        implication: Formula,
        lines: &[usize],
    ) -> Result<usize, ProverError> {
        trace!(goal = %implication, ?lines, "tautological implication");
        Prover::reject_placeholder(&implication)?;
        // chain[k] is the implication still to be discharged after lines[..k]
        let mut chain = vec![implication];
        for &line in lines.iter().rev() {
            let premise = self.formula_at(line)?.clone();
            let next = Formula::implies(premise, chain[chain.len() - 1].clone());
            chain.push(next);
        }
        chain.reverse();

        self.transaction(|prover| {
            let mut current = prover.add_tautology(chain[0].clone())?;
            for (k, &line) in lines.iter().enumerate() {
                current = prover.add_mp(chain[k + 1].clone(), line, current)?;
            }
            Ok(current)
        })
    }

    /// Derive `consequent` from `Ex[P]` at `existential` and `(P->consequent)` at `conditional`
    ///
    /// `x` must not be free in `consequent`. Generalizes the conditional to
    /// `Ax[(P->consequent)]`, instantiates ES with `R := P[x:=_]`,
    /// `Q := consequent`, `x := x`, and folds the three lines tautologically.
    pub fn add_existential_derivation(
        &mut self,
        consequent: Formula,
        existential: usize,
        conditional: usize,
    ) -> Result<usize, ProverError> {
        trace!(goal = %consequent, existential, conditional, "existential derivation");
        Prover::reject_placeholder(&consequent)?;
        let quantified = self.formula_at(existential)?.clone();
        let (variable, predicate) = match quantified.as_quantified(Quantifier::Exists) {
            Some(parts) => parts,
            None => {
                return Err(ProverError::UnexpectedShape {
                    line: existential,
                    expected: "existentially quantified",
                    formula: quantified.clone(),
                })
            }
        };
        let expected = Formula::implies(predicate.clone(), consequent.clone());
        let found = self.formula_at(conditional)?;
        if found != &expected {
            return Err(ProverError::Mismatch {
                expected,
                found: found.clone(),
            });
        }
        if consequent.free_variables().contains(&variable.name) {
            return Err(ProverError::FreeVariable {
                variable: variable.name.clone(),
                formula: consequent,
            });
        }

        let generalized = Formula::forall(variable.clone(), expected);
        let axiom_instance = Formula::implies(
            Formula::and(generalized.clone(), quantified.clone()),
            consequent.clone(),
        );
        let map = InstantiationMap::new()
            .formula("R", parametrize(predicate, variable)?)
            .formula("Q", consequent.clone())
            .variable("x", variable.name.clone());

        self.transaction(|prover| {
            let ug = prover.add_ug(generalized, conditional)?;
            let es = prover.add_instantiated_assumption(
                axiom_instance,
                Axiom::ExistentialSimplification.schema(),
                map,
            )?;
            prover.add_tautological_implication(consequent, &[existential, ug, es])
        })
    }

    /// Derive `P[v1:=t1,...,vk:=tk]` from `P` at `line`
    ///
    /// Each `vi` is first renamed to a fresh variable by generalization and
    /// instantiation; only then is each fresh variable instantiated to its
    /// term. Renaming first keeps one replacement from interfering with a
    /// variable that is still waiting to be replaced.
    pub fn add_free_instantiation(
        &mut self,
        instantiation: Formula,
        line: usize,
        map: &Substitution,
    ) -> Result<usize, ProverError> {
        trace!(goal = %instantiation, line, "free instantiation");
        Prover::reject_placeholder(&instantiation)?;
        for (_, term) in map.iter() {
            Prover::reject_placeholder_term(term)?;
        }
        if let Some((name, _)) = map.iter().find(|(name, _)| !is_variable(name)) {
            return Err(ProverError::NotVariable(name.clone()));
        }
        let source = self.formula_at(line)?.clone();
        let expected = source.substitute(map, &HashSet::new())?;
        if expected != instantiation {
            return Err(ProverError::Mismatch {
                expected,
                found: instantiation,
            });
        }
        if map.is_empty() {
            return Ok(line);
        }

        let mut used = source.variables();
        used.extend(instantiation.variables());
        for (name, term) in map.iter() {
            used.insert(name.clone());
            term.collect_variables(&mut used);
        }
        let mut renames = Vec::with_capacity(map.len());
        for (name, term) in map.iter() {
            let fresh = self.fresh_variable(&used);
            used.insert(fresh.clone());
            renames.push((name.clone(), fresh, term.clone()));
        }

        self.transaction(|prover| {
            let mut current = source;
            let mut current_line = line;
            for (name, fresh, _) in &renames {
                (current, current_line) =
                    prover.generalize_and_instantiate(current, current_line, name, Term::variable(fresh))?;
            }
            for (_, fresh, term) in &renames {
                (current, current_line) =
                    prover.generalize_and_instantiate(current, current_line, fresh, term.clone())?;
            }
            Ok(current_line)
        })
    }

    /// UG over `variable`, then UI with `term`
    fn generalize_and_instantiate(
        &mut self,
        formula: Formula,
        line: usize,
        variable: &str,
        term: Term,
    ) -> Result<(Formula, usize), ProverError> {
        let instance = formula.substitute(
            &Substitution::single(variable, term.clone()),
            &HashSet::new(),
        )?;
        let ug = self.add_ug(Formula::forall(Variable::new(variable), formula), line)?;
        let ui = self.add_universal_instantiation(instance.clone(), ug, term)?;
        Ok((instance, ui))
    }
}
