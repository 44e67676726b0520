//! nom combinators for the canonical textual form
//!
//! ```text
//! term    := constant | variable | function "(" term {"," term} ")"
//! formula := term "=" term
//!          | relation "(" [term {"," term}] ")"
//!          | "~" formula
//!          | "(" formula ("&"|"|"|"->") formula ")"
//!          | ("A"|"E") variable "[" formula "]"
//! ```
//!
//! The grammar has no whitespace and no operator precedence: every binary
//! formula is parenthesized, so each string has exactly one tree.

use crate::fol::names::{classify, is_relation, is_variable, SymbolKind, PLACEHOLDER};
use crate::fol::{Connective, Constant, Formula, Quantifier, Term, Variable};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{map, value},
    error::ErrorKind,
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded},
    IResult,
};

fn reject<T>(input: &str, kind: ErrorKind) -> IResult<&str, T> {
    Err(nom::Err::Error(nom::error::Error::new(input, kind)))
}

/// Parse a symbol name (the placeholder or an alphanumeric token)
fn symbol_name(input: &str) -> IResult<&str, &str> {
    alt((tag(PLACEHOLDER), take_while1(|c: char| c.is_ascii_alphanumeric())))(input)
}

/// Parse a term
pub(crate) fn term(input: &str) -> IResult<&str, Term> {
    let (rest, name) = symbol_name(input)?;
    match classify(name) {
        Some(SymbolKind::Constant) => Ok((rest, Term::Constant(Constant::new(name)))),
        Some(SymbolKind::Variable) => Ok((rest, Term::Variable(Variable::new(name)))),
        Some(SymbolKind::Function) => {
            let (rest, args) =
                delimited(char('('), separated_list1(char(','), term), char(')'))(rest)?;
            Ok((rest, Term::function(name, args)))
        }
        _ => reject(input, ErrorKind::Alpha),
    }
}

/// Parse a formula
pub(crate) fn formula(input: &str) -> IResult<&str, Formula> {
    alt((negation, binary, quantified, relation, equality))(input)
}

fn negation(input: &str) -> IResult<&str, Formula> {
    map(preceded(char('~'), formula), Formula::not)(input)
}

fn connective(input: &str) -> IResult<&str, Connective> {
    alt((
        value(Connective::And, char('&')),
        value(Connective::Or, char('|')),
        value(Connective::Implies, tag("->")),
    ))(input)
}

/// Parse `(left op right)`
fn binary(input: &str) -> IResult<&str, Formula> {
    let (input, _) = char('(')(input)?;
    let (input, left) = formula(input)?;
    let (input, op) = connective(input)?;
    let (input, right) = formula(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Formula::binary(op, left, right)))
}

/// Parse `Ax[...]` or `Ex[...]`
fn quantified(input: &str) -> IResult<&str, Formula> {
    let (input, quantifier) = alt((
        value(Quantifier::Forall, char('A')),
        value(Quantifier::Exists, char('E')),
    ))(input)?;
    let (rest, name) = symbol_name(input)?;
    if !is_variable(name) {
        return reject(input, ErrorKind::Alpha);
    }
    let (rest, predicate) = delimited(char('['), formula, char(']'))(rest)?;
    Ok((rest, Formula::quantified(quantifier, Variable::new(name), predicate)))
}

/// Parse a relation application, possibly with no arguments
fn relation(input: &str) -> IResult<&str, Formula> {
    let (rest, name) = symbol_name(input)?;
    if !is_relation(name) {
        return reject(input, ErrorKind::Alpha);
    }
    let (rest, args) = delimited(char('('), separated_list0(char(','), term), char(')'))(rest)?;
    Ok((rest, Formula::relation(name, args)))
}

/// Parse `left=right`
fn equality(input: &str) -> IResult<&str, Formula> {
    let (input, left) = term(input)?;
    let (input, _) = char('=')(input)?;
    let (input, right) = term(input)?;
    Ok((input, Formula::equality(left, right)))
}
