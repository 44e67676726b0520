//! Equality rules built from the RX and ME axioms

use super::{Axiom, Prover, ProverError};
use crate::fol::{Formula, Substitution, Term, PLACEHOLDER};
use crate::proof::InstantiationMap;
use std::collections::HashSet;
use tracing::trace;

impl Prover {
    /// Derive `b=a` from `a=b` at `line`
    ///
    /// Instantiates ME with `R := _=a`, `c := a`, `d := b` to get
    /// `(a=b->(a=a->b=a))`, then discharges `a=b` and the RX instance `a=a`.
    pub fn add_flipped_equality(&mut self, flipped: Formula, line: usize) -> Result<usize, ProverError> {
        trace!(goal = %flipped, line, "flipped equality");
        Prover::reject_placeholder(&flipped)?;
        let (a, b) = self.equality_at(line)?;
        let expected = Formula::equality(b.clone(), a.clone());
        if expected != flipped {
            return Err(ProverError::Mismatch {
                expected,
                found: flipped,
            });
        }
        let reflexive = Formula::equality(a.clone(), a.clone());
        let tail = Formula::implies(reflexive.clone(), flipped.clone());
        let axiom_instance = Formula::implies(Formula::equality(a.clone(), b.clone()), tail.clone());
        let map = InstantiationMap::new()
            .formula("R", Formula::equality(Term::placeholder(), a.clone()))
            .term("c", a.clone())
            .term("d", b);

        self.transaction(|prover| {
            let me = prover.add_instantiated_assumption(
                axiom_instance,
                Axiom::MeaningOfEquality.schema(),
                map,
            )?;
            let implication = prover.add_mp(tail, line, me)?;
            let rx = prover.add_reflexivity(reflexive, a)?;
            prover.add_mp(flipped, rx, implication)
        })
    }

    /// Derive `T(a)=T(b)` from `a=b` at `line`, for a term `T(_)` over the placeholder
    ///
    /// Instantiates ME with `R := T(a)=T(_)`, `c := a`, `d := b`, then
    /// discharges `a=b` and the RX instance `T(a)=T(a)`.
    pub fn add_substituted_equality(
        &mut self,
        substituted: Formula,
        line: usize,
        parametrized: Term,
    ) -> Result<usize, ProverError> {
        trace!(goal = %substituted, line, parametrized = %parametrized, "substituted equality");
        Prover::reject_placeholder(&substituted)?;
        let (a, b) = self.equality_at(line)?;
        let plug = |t: &Term| {
            parametrized.substitute(&Substitution::single(PLACEHOLDER, t.clone()), &HashSet::new())
        };
        let ta = plug(&a)?;
        let tb = plug(&b)?;
        let expected = Formula::equality(ta.clone(), tb);
        if expected != substituted {
            return Err(ProverError::Mismatch {
                expected,
                found: substituted,
            });
        }
        let reflexive = Formula::equality(ta.clone(), ta.clone());
        let tail = Formula::implies(reflexive.clone(), substituted.clone());
        let axiom_instance = Formula::implies(Formula::equality(a.clone(), b.clone()), tail.clone());
        let map = InstantiationMap::new()
            .formula("R", Formula::equality(ta.clone(), parametrized))
            .term("c", a)
            .term("d", b);

        self.transaction(|prover| {
            let me = prover.add_instantiated_assumption(
                axiom_instance,
                Axiom::MeaningOfEquality.schema(),
                map,
            )?;
            let implication = prover.add_mp(tail, line, me)?;
            let rx = prover.add_reflexivity(reflexive, ta)?;
            prover.add_mp(substituted, rx, implication)
        })
    }

    /// Derive `a=z` from the chain `a=b`, `b=c`, ..., `y=z` at `lines`
    ///
    /// Folds left to right. Each step flips `a=b` to `b=a`, instantiates ME
    /// with `R := _=c`, `c := b`, `d := a` to get `(b=a->(b=c->a=c))`, and
    /// applies modus ponens twice.
    pub fn add_chained_equality(&mut self, chained: Formula, lines: &[usize]) -> Result<usize, ProverError> {
        trace!(goal = %chained, ?lines, "chained equality");
        Prover::reject_placeholder(&chained)?;
        if lines.len() < 2 {
            return Err(ProverError::ChainTooShort(lines.len()));
        }
        let mut sides = Vec::with_capacity(lines.len());
        for &line in lines {
            sides.push(self.equality_at(line)?);
        }
        for (k, pair) in sides.windows(2).enumerate() {
            let (_, previous_right) = &pair[0];
            let (next_left, _) = &pair[1];
            if previous_right != next_left {
                return Err(ProverError::ChainBreak {
                    line: lines[k + 1],
                    expected: previous_right.clone(),
                    found: next_left.clone(),
                });
            }
        }
        let first = sides[0].0.clone();
        let last = sides[sides.len() - 1].1.clone();
        let expected = Formula::equality(first.clone(), last);
        if expected != chained {
            return Err(ProverError::Mismatch {
                expected,
                found: chained,
            });
        }

        self.transaction(|prover| {
            let mut current = lines[0];
            for (k, (b, c)) in sides.iter().enumerate().skip(1) {
                current = prover.chain_step(current, &first, b, c, lines[k])?;
            }
            Ok(current)
        })
    }

    /// From `a=b` at `left` and `b=c` at `right`, derive `a=c`
    fn chain_step(&mut self, left: usize, a: &Term, b: &Term, c: &Term, right: usize) -> Result<usize, ProverError> {
        let flipped = self.add_flipped_equality(Formula::equality(b.clone(), a.clone()), left)?;
        let conclusion = Formula::equality(a.clone(), c.clone());
        let tail = Formula::implies(Formula::equality(b.clone(), c.clone()), conclusion.clone());
        let axiom_instance = Formula::implies(Formula::equality(b.clone(), a.clone()), tail.clone());
        let map = InstantiationMap::new()
            .formula("R", Formula::equality(Term::placeholder(), c.clone()))
            .term("c", b.clone())
            .term("d", a.clone());
        let me = self.add_instantiated_assumption(axiom_instance, Axiom::MeaningOfEquality.schema(), map)?;
        let implication = self.add_mp(tail, flipped, me)?;
        self.add_mp(conclusion, right, implication)
    }

    /// The RX instance `t=t`
    fn add_reflexivity(&mut self, reflexive: Formula, term: Term) -> Result<usize, ProverError> {
        self.add_instantiated_assumption(
            reflexive,
            Axiom::Reflexivity.schema(),
            InstantiationMap::new().term("c", term),
        )
    }
}
