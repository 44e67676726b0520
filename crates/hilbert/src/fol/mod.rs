//! First-order logic data structures
//!
//! This module provides the fundamental types for representing FOL formulas:
//! symbol naming conventions, terms, formulas and capture-avoiding
//! substitutions.

pub mod formula;
pub mod names;
pub mod substitution;
pub mod term;

#[cfg(test)]
mod proptest_tests;

// Re-export commonly used types
pub use formula::{Connective, Formula, PredicateSymbol, Quantifier};
pub use names::{classify, SymbolKind, PLACEHOLDER};
pub use substitution::{ForbiddenVariable, Substitution};
pub use term::{Constant, FunctionSymbol, Term, Variable};
