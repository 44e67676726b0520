//! Hilbert: a builder and checker for Hilbert-style first-order proofs
//!
//! This library provides first-order terms and formulas with
//! capture-avoiding substitution, schemas with checked instantiation, proof
//! lines that can each be verified on their own, and a `Prover` that expands
//! higher-level derivation rules into verified lines.
//!
//! ```
//! use hilbert::{Formula, Prover, Schema, Term, TruthTable};
//!
//! let premise = Formula::parse("Ax[R(x)]").unwrap();
//! let mut prover = Prover::new([Schema::fixed(premise.clone())]);
//! let line = prover.add_assumption(premise).unwrap();
//! prover
//!     .add_universal_instantiation(Formula::parse("R(c)").unwrap(), line, Term::constant("c"))
//!     .unwrap();
//! let proof = prover.qed().unwrap();
//! assert!(proof.is_valid(&TruthTable));
//! ```

pub mod config;
pub mod fol;
pub mod json;
pub mod parser;
pub mod proof;
pub mod propositional;
pub mod prover;

pub use config::ProverConfig;

// Re-export commonly used types from fol
pub use fol::{
    Connective, Constant, ForbiddenVariable, Formula, FunctionSymbol, PredicateSymbol, Quantifier,
    Substitution, Term, Variable,
};

pub use json::{JsonError, LineJson, ProofJson, SchemaJson};
pub use parser::{parse_formula, parse_term, ParseError};
pub use proof::{
    Binding, InstantiationError, InstantiationMap, Line, LineError, Proof, Schema, VerificationError,
};
pub use propositional::{Proposition, Skeleton, TautologyOracle, TruthTable};
pub use prover::{Axiom, FreshNames, Prover, ProverError};
