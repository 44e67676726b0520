//! Parser for the canonical textual form of terms and formulas
//!
//! Parsing is the inverse of `Display`: `parse(print(x)) == x` for every
//! term and formula. Textual input is turned into trees here, at the API
//! boundary; the rest of the crate only works with trees.

pub mod grammar;

use crate::fol::{Formula, Term};
use nom::combinator::all_consuming;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a string is not a valid term or formula
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{input}' (parsing stopped at '{remaining}')")]
pub struct ParseError {
    /// What was being parsed ("term" or "formula")
    pub kind: &'static str,
    pub input: String,
    /// Unparsed suffix at the point of failure
    pub remaining: String,
}

impl ParseError {
    fn new(kind: &'static str, input: &str, err: nom::Err<nom::error::Error<&str>>) -> Self {
        let remaining = match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.input.to_string(),
            nom::Err::Incomplete(_) => String::new(),
        };
        ParseError {
            kind,
            input: input.to_string(),
            remaining,
        }
    }
}

/// Parse a term from its canonical textual form
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    all_consuming(grammar::term)(input)
        .map(|(_, term)| term)
        .map_err(|e| ParseError::new("term", input, e))
}

/// Parse a formula from its canonical textual form
pub fn parse_formula(input: &str) -> Result<Formula, ParseError> {
    all_consuming(grammar::formula)(input)
        .map(|(_, formula)| formula)
        .map_err(|e| ParseError::new("formula", input, e))
}

impl Term {
    /// Parse a term from its canonical textual form
    pub fn parse(input: &str) -> Result<Term, ParseError> {
        parse_term(input)
    }
}

impl Formula {
    /// Parse a formula from its canonical textual form
    pub fn parse(input: &str) -> Result<Formula, ParseError> {
        parse_formula(input)
    }
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_term(s)
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}
