//! Prover: builds proofs one verified line at a time.
//!
//! A `Prover` holds an assumption set (the six axioms plus the caller's
//! schemas) and an append-only list of lines. Every operation appends one or
//! more lines and returns the index of the line holding the requested
//! formula. Each line is checked against the assumption set and the earlier
//! lines before it is appended.
//!
//! Operations are transactional: when one fails, the line list is truncated
//! back to its length before the call.
//!
//! The primitive steps live here; the quantifier rules are in
//! [`quantifiers`] and the equality rules in [`equality`].

pub mod axioms;
pub mod equality;
pub mod fresh;
pub mod quantifiers;

pub use axioms::Axiom;
pub use fresh::FreshNames;

use crate::config::ProverConfig;
use crate::fol::names::{is_variable, PLACEHOLDER};
use crate::fol::{ForbiddenVariable, Formula, Quantifier, Term};
use crate::proof::{InstantiationError, InstantiationMap, Line, LineError, Proof, Schema, VerificationError};
use crate::propositional::{TautologyOracle, TruthTable};
use indexmap::IndexSet;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by prover operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    #[error("line {line} does not exist (the proof has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    #[error("{0} is not in the assumption set")]
    UnknownAssumption(String),

    #[error("expected {expected}, found {found}")]
    Mismatch { expected: Formula, found: Formula },

    #[error("line {line} is not {expected}: {formula}")]
    UnexpectedShape {
        line: usize,
        expected: &'static str,
        formula: Formula,
    },

    #[error("{formula} is not a universal generalization of line {line}")]
    NotGeneralization { formula: Formula, line: usize },

    #[error("{0} is not a tautology")]
    NotTautology(Formula),

    #[error("variable {variable} is free in {formula}")]
    FreeVariable { variable: String, formula: Formula },

    #[error("'{0}' is not a variable name")]
    NotVariable(String),

    #[error("equality chain needs at least two lines, got {0}")]
    ChainTooShort(usize),

    #[error("equality chain breaks at line {line}: expected left side {expected}, found {found}")]
    ChainBreak { line: usize, expected: Term, found: Term },

    #[error("proof has no lines")]
    EmptyProof,

    #[error("reserved placeholder '_' appears in {0}")]
    Placeholder(String),

    #[error("invalid fresh variable prefix '{0}'")]
    InvalidFreshPrefix(String),

    #[error(transparent)]
    Capture(#[from] ForbiddenVariable),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    #[error("sub-proof does not verify: {0}")]
    InvalidProof(#[from] VerificationError),

    #[error("line {index} rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: LineError,
    },
}

// =============================================================================
// Prover
// =============================================================================

/// Incremental builder of verified proofs
pub struct Prover {
    assumptions: IndexSet<Schema>,
    lines: Vec<Line>,
    fresh: FreshNames,
    config: ProverConfig,
    oracle: Box<dyn TautologyOracle>,
}

impl fmt::Debug for Prover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prover")
            .field("assumptions", &self.assumptions)
            .field("lines", &self.lines)
            .field("fresh", &self.fresh)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Prover {
    /// Prover over the axioms plus `assumptions`, checking tautologies by truth tables
    pub fn new(assumptions: impl IntoIterator<Item = Schema>) -> Self {
        Prover::build(assumptions, ProverConfig::default(), Box::new(TruthTable))
    }

    /// Prover with explicit configuration and tautology oracle
    pub fn with_config(
        assumptions: impl IntoIterator<Item = Schema>,
        config: ProverConfig,
        oracle: Box<dyn TautologyOracle>,
    ) -> Result<Self, ProverError> {
        let prefix = &config.fresh_variable_prefix;
        if !is_variable(prefix) || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ProverError::InvalidFreshPrefix(prefix.clone()));
        }
        Ok(Prover::build(assumptions, config, oracle))
    }

    fn build(
        assumptions: impl IntoIterator<Item = Schema>,
        config: ProverConfig,
        oracle: Box<dyn TautologyOracle>,
    ) -> Self {
        let mut set: IndexSet<Schema> = Axiom::schemas().collect();
        set.extend(assumptions);
        Prover {
            assumptions: set,
            lines: Vec::new(),
            fresh: FreshNames::new(config.fresh_variable_prefix.clone()),
            config,
            oracle,
        }
    }

    pub fn assumptions(&self) -> &IndexSet<Schema> {
        &self.assumptions
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// Formula at an existing line
    pub fn formula_at(&self, line: usize) -> Result<&Formula, ProverError> {
        self.lines
            .get(line)
            .map(Line::formula)
            .ok_or(ProverError::LineOutOfRange {
                line,
                len: self.lines.len(),
            })
    }

    /// Freeze the lines into a proof of the last line's formula
    pub fn qed(self) -> Result<Proof, ProverError> {
        let conclusion = match self.lines.last() {
            Some(line) => line.formula().clone(),
            None => return Err(ProverError::EmptyProof),
        };
        debug!(lines = self.lines.len(), conclusion = %conclusion, "qed");
        Ok(Proof::new(self.assumptions, conclusion, self.lines))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Validate `line` at the next index and append it
    fn append(&mut self, line: Line) -> Result<usize, ProverError> {
        let index = self.lines.len();
        if let Err(source) = line.check(&self.assumptions, &self.lines, index, self.oracle.as_ref()) {
            warn!(index, line = %line, error = %source, "line rejected");
            return Err(ProverError::Rejected { index, source });
        }
        if self.config.announce_lines {
            info!(index, line = %line, "line added");
        } else {
            debug!(index, line = %line, "line added");
        }
        self.lines.push(line);
        Ok(index)
    }

    /// Run `f`, dropping every line it appended if it fails
    pub(crate) fn transaction<F>(&mut self, f: F) -> Result<usize, ProverError>
    where
        F: FnOnce(&mut Prover) -> Result<usize, ProverError>,
    {
        let mark = self.lines.len();
        let result = f(self);
        if let Err(err) = &result {
            debug!(dropped = self.lines.len() - mark, error = %err, "rolling back");
            self.lines.truncate(mark);
        }
        result
    }

    /// Caller formulas may not mention `_`; it is reserved for templates
    pub(crate) fn reject_placeholder(formula: &Formula) -> Result<(), ProverError> {
        if formula.constants().contains(PLACEHOLDER) {
            return Err(ProverError::Placeholder(formula.to_string()));
        }
        Ok(())
    }

    pub(crate) fn reject_placeholder_term(term: &Term) -> Result<(), ProverError> {
        if term.constants().contains(PLACEHOLDER) {
            return Err(ProverError::Placeholder(term.to_string()));
        }
        Ok(())
    }

    pub(crate) fn fresh_variable(&mut self, used: &HashSet<String>) -> String {
        self.fresh.next_avoiding(used)
    }

    /// The `(left, right)` sides of the equality at `line`
    pub(crate) fn equality_at(&self, line: usize) -> Result<(Term, Term), ProverError> {
        let formula = self.formula_at(line)?;
        match formula.as_equality() {
            Some((left, right)) => Ok((left.clone(), right.clone())),
            None => Err(ProverError::UnexpectedShape {
                line,
                expected: "an equality",
                formula: formula.clone(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Primitive steps
    // -------------------------------------------------------------------------

    /// Append an instance of an assumption or axiom schema
    pub fn add_instantiated_assumption(
        &mut self,
        instance: Formula,
        assumption: Schema,
        instantiation: InstantiationMap,
    ) -> Result<usize, ProverError> {
        Prover::reject_placeholder(&instance)?;
        if !self.assumptions.contains(&assumption) {
            return Err(ProverError::UnknownAssumption(assumption.to_string()));
        }
        let expected = assumption.instantiate(&instantiation)?;
        if expected != instance {
            return Err(ProverError::Mismatch {
                expected,
                found: instance,
            });
        }
        self.append(Line::Assumption {
            formula: instance,
            assumption,
            instantiation,
        })
    }

    /// Append an assumption that has no templates
    pub fn add_assumption(&mut self, instance: Formula) -> Result<usize, ProverError> {
        let assumption = Schema::fixed(instance.clone());
        self.add_instantiated_assumption(instance, assumption, InstantiationMap::new())
    }

    /// Append a formula whose propositional skeleton is a tautology
    pub fn add_tautology(&mut self, tautology: Formula) -> Result<usize, ProverError> {
        Prover::reject_placeholder(&tautology)?;
        if !self.oracle.is_skeleton_tautology(&tautology) {
            return Err(ProverError::NotTautology(tautology));
        }
        self.append(Line::Tautology { formula: tautology })
    }

    /// Append `consequent` by modus ponens from `antecedent` and `(antecedent->consequent)`
    pub fn add_mp(
        &mut self,
        consequent: Formula,
        antecedent: usize,
        conditional: usize,
    ) -> Result<usize, ProverError> {
        Prover::reject_placeholder(&consequent)?;
        let expected = Formula::implies(self.formula_at(antecedent)?.clone(), consequent.clone());
        let found = self.formula_at(conditional)?;
        if found != &expected {
            return Err(ProverError::Mismatch {
                expected,
                found: found.clone(),
            });
        }
        self.append(Line::ModusPonens {
            formula: consequent,
            antecedent,
            conditional,
        })
    }

    /// Append `Ax[P]` by universal generalization of `P` at `line`
    pub fn add_ug(&mut self, quantified: Formula, line: usize) -> Result<usize, ProverError> {
        Prover::reject_placeholder(&quantified)?;
        let predicate = self.formula_at(line)?;
        let generalizes = matches!(
            quantified.as_quantified(Quantifier::Forall),
            Some((_, body)) if body == predicate
        );
        if !generalizes {
            return Err(ProverError::NotGeneralization { formula: quantified, line });
        }
        self.append(Line::UniversalGeneralization {
            formula: quantified,
            predicate: line,
        })
    }

    /// Inline a complete proof of `conclusion` whose assumptions are all available here
    ///
    /// Assumption and tautology lines are copied as they are; premise
    /// references are shifted past the lines already present.
    pub fn add_proof(&mut self, conclusion: Formula, proof: &Proof) -> Result<usize, ProverError> {
        trace!(conclusion = %conclusion, lines = proof.lines.len(), "add_proof");
        Prover::reject_placeholder(&conclusion)?;
        for line in &proof.lines {
            Prover::reject_placeholder(line.formula())?;
        }
        if proof.conclusion != conclusion {
            return Err(ProverError::Mismatch {
                expected: conclusion,
                found: proof.conclusion.clone(),
            });
        }
        if let Some(missing) = proof.assumptions.iter().find(|a| !self.assumptions.contains(*a)) {
            return Err(ProverError::UnknownAssumption(missing.to_string()));
        }
        proof.verify(self.oracle.as_ref())?;

        let offset = self.lines.len();
        self.transaction(|prover| {
            let mut last = offset;
            for line in &proof.lines {
                last = prover.append(line.shifted(offset))?;
            }
            Ok(last)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    fn prover() -> Prover {
        Prover::new([
            Schema::fixed(formula("R(c)")),
            Schema::fixed(formula("(R(c)->Q(c))")),
        ])
    }

    #[test]
    fn test_axioms_are_assumed() {
        let prover = prover();
        assert_eq!(prover.assumptions().len(), 8);
        for axiom in Axiom::ALL {
            assert!(prover.assumptions().contains(&axiom.schema()));
        }
    }

    #[test]
    fn test_primitives() {
        let mut prover = prover();
        let premise = prover.add_assumption(formula("R(c)")).unwrap();
        let conditional = prover.add_assumption(formula("(R(c)->Q(c))")).unwrap();
        let mp = prover.add_mp(formula("Q(c)"), premise, conditional).unwrap();
        let ug = prover.add_ug(formula("Ax[Q(c)]"), mp).unwrap();
        let taut = prover.add_tautology(formula("(Q(c)|~Q(c))")).unwrap();
        assert_eq!((premise, conditional, mp, ug, taut), (0, 1, 2, 3, 4));

        let proof = prover.qed().unwrap();
        assert_eq!(proof.conclusion, formula("(Q(c)|~Q(c))"));
        assert!(proof.is_valid(&TruthTable));
    }

    #[test]
    fn test_instantiated_axiom() {
        let mut prover = prover();
        let map = InstantiationMap::new().term("c", Term::parse("f(a)").unwrap());
        let line = prover
            .add_instantiated_assumption(formula("f(a)=f(a)"), Axiom::Reflexivity.schema(), map)
            .unwrap();
        assert_eq!(prover.formula_at(line).unwrap(), &formula("f(a)=f(a)"));
    }

    #[test]
    fn test_contract_violations_leave_lines_untouched() {
        let mut prover = prover();
        prover.add_assumption(formula("R(c)")).unwrap();

        assert!(matches!(
            prover.add_assumption(formula("R(d)")),
            Err(ProverError::UnknownAssumption(_))
        ));
        assert!(matches!(
            prover.add_tautology(formula("(R(c)->Q(c))")),
            Err(ProverError::NotTautology(_))
        ));
        assert_eq!(
            prover.add_mp(formula("Q(c)"), 0, 5),
            Err(ProverError::LineOutOfRange { line: 5, len: 1 })
        );
        assert!(matches!(
            prover.add_mp(formula("Q(c)"), 0, 0),
            Err(ProverError::Mismatch { .. })
        ));
        assert!(matches!(
            prover.add_ug(formula("Ex[R(c)]"), 0),
            Err(ProverError::NotGeneralization { .. })
        ));
        assert!(matches!(
            prover.add_instantiated_assumption(
                formula("c=d"),
                Axiom::Reflexivity.schema(),
                InstantiationMap::new()
            ),
            Err(ProverError::Mismatch { .. })
        ));
        assert_eq!(prover.len(), 1);
    }

    #[test]
    fn test_qed_requires_lines() {
        assert_eq!(prover().qed().unwrap_err(), ProverError::EmptyProof);
    }

    #[test]
    fn test_invalid_fresh_prefix() {
        let config = ProverConfig {
            fresh_variable_prefix: "a".to_string(),
            ..ProverConfig::default()
        };
        assert!(matches!(
            Prover::with_config(Vec::new(), config, Box::new(TruthTable)),
            Err(ProverError::InvalidFreshPrefix(_))
        ));
    }

    #[test]
    fn test_add_proof_shifts_references() {
        let mut inner = prover();
        let premise = inner.add_assumption(formula("R(c)")).unwrap();
        let conditional = inner.add_assumption(formula("(R(c)->Q(c))")).unwrap();
        inner.add_mp(formula("Q(c)"), premise, conditional).unwrap();
        let inner = inner.qed().unwrap();

        let mut outer = prover();
        outer.add_tautology(formula("(R(c)->R(c))")).unwrap();
        outer.add_tautology(formula("(Q(c)->Q(c))")).unwrap();
        let line = outer.add_proof(formula("Q(c)"), &inner).unwrap();
        assert_eq!(line, 4);
        assert_eq!(
            outer.lines()[4],
            Line::ModusPonens {
                formula: formula("Q(c)"),
                antecedent: 2,
                conditional: 3
            }
        );
        assert!(outer.qed().unwrap().is_valid(&TruthTable));
    }

    #[test]
    fn test_add_proof_requires_known_assumptions() {
        let mut inner = Prover::new([Schema::fixed(formula("S()"))]);
        inner.add_assumption(formula("S()")).unwrap();
        let inner = inner.qed().unwrap();

        let mut outer = prover();
        assert!(matches!(
            outer.add_proof(formula("S()"), &inner),
            Err(ProverError::UnknownAssumption(_))
        ));
        assert!(outer.is_empty());
    }
    #[test]
    fn test_placeholder_is_reserved() {
        let mut prover = Prover::new([
            Schema::fixed(formula("Ax[R(x,_)]")),
            Schema::fixed(formula("Ax[R(x)]")),
        ]);
        assert_eq!(
            prover.add_assumption(formula("Ax[R(x,_)]")),
            Err(ProverError::Placeholder("Ax[R(x,_)]".to_string()))
        );
        assert!(matches!(
            prover.add_tautology(formula("(R(_)|~R(_))")),
            Err(ProverError::Placeholder(_))
        ));

        let line = prover.add_assumption(formula("Ax[R(x)]")).unwrap();
        assert_eq!(
            prover.add_universal_instantiation(formula("R(_)"), line, Term::placeholder()),
            Err(ProverError::Placeholder("R(_)".to_string()))
        );
        assert!(matches!(
            prover.add_universal_instantiation(formula("R(c)"), line, Term::parse("f(_)").unwrap()),
            Err(ProverError::Placeholder(_))
        ));
        assert_eq!(prover.len(), 1);
    }

    // -------------------------------------------------------------------------
    // Each axiom through add_instantiated_assumption
    // -------------------------------------------------------------------------

    fn assert_axiom_instance(axiom: Axiom, map: InstantiationMap, instance: &str) {
        let mut prover = Prover::new(Vec::new());
        let line = prover
            .add_instantiated_assumption(formula(instance), axiom.schema(), map)
            .unwrap_or_else(|e| panic!("{}: {}", axiom.name(), e));
        assert_eq!(prover.formula_at(line).unwrap(), &formula(instance));
        assert!(prover.qed().unwrap().is_valid(&TruthTable), "{}", axiom.name());
    }

    #[test]
    fn test_universal_instantiation_axiom() {
        let map = InstantiationMap::new()
            .formula("R", formula("Q(_,y)"))
            .variable("x", "z")
            .term("c", Term::parse("f(a)").unwrap());
        assert_axiom_instance(Axiom::UniversalInstantiation, map, "(Az[Q(z,y)]->Q(f(a),y))");
    }

    #[test]
    fn test_existential_introduction_axiom() {
        let map = InstantiationMap::new()
            .formula("R", formula("(S(_)&T(_))"))
            .variable("x", "y")
            .term("c", Term::constant("b"));
        assert_axiom_instance(
            Axiom::ExistentialIntroduction,
            map,
            "((S(b)&T(b))->Ey[(S(y)&T(y))])",
        );
    }

    #[test]
    fn test_universal_simplification_axiom() {
        let map = InstantiationMap::new()
            .formula("Q", formula("P(c)"))
            .formula("R", formula("S(_,c)"))
            .variable("x", "x");
        assert_axiom_instance(
            Axiom::UniversalSimplification,
            map,
            "(Ax[(P(c)->S(x,c))]->(P(c)->Ax[S(x,c)]))",
        );
    }

    #[test]
    fn test_universal_simplification_axiom_rejects_bound_q() {
        let map = InstantiationMap::new()
            .formula("Q", formula("P(x)"))
            .formula("R", formula("S(_)"))
            .variable("x", "x");
        let mut prover = Prover::new(Vec::new());
        assert!(matches!(
            prover.add_instantiated_assumption(
                formula("(Ax[(P(x)->S(x))]->(P(x)->Ax[S(x)]))"),
                Axiom::UniversalSimplification.schema(),
                map
            ),
            Err(ProverError::Instantiation(_))
        ));
        assert!(prover.is_empty());
    }

    #[test]
    fn test_existential_simplification_axiom() {
        let map = InstantiationMap::new()
            .formula("R", formula("R(_)"))
            .formula("Q", formula("Q(d)"))
            .variable("x", "u");
        assert_axiom_instance(
            Axiom::ExistentialSimplification,
            map,
            "((Au[(R(u)->Q(d))]&Eu[R(u)])->Q(d))",
        );
    }

    #[test]
    fn test_reflexivity_axiom() {
        let map = InstantiationMap::new().term("c", Term::parse("g(x,b)").unwrap());
        assert_axiom_instance(Axiom::Reflexivity, map, "g(x,b)=g(x,b)");
    }

    #[test]
    fn test_meaning_of_equality_axiom() {
        let map = InstantiationMap::new()
            .formula("R", formula("Ay[_=y]"))
            .term("c", Term::constant("a"))
            .term("d", Term::variable("x"));
        assert_axiom_instance(
            Axiom::MeaningOfEquality,
            map,
            "(a=x->(Ay[a=y]->Ay[x=y]))",
        );
    }
}
