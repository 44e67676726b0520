//! First-order formulas
//!
//! Formulas are immutable trees over equalities, relation applications,
//! negation, the binary connectives `&`, `|` and `->`, and the quantifiers
//! `A` (for all) and `E` (exists). Every transformation builds a new tree.

use super::names::is_relation;
use super::term::{FunctionSymbol, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// Binary propositional connective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
    Implies,
}

impl Quantifier {
    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::Forall => "A",
            Quantifier::Exists => "E",
        }
    }
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Implies => "->",
        }
    }
}

/// A relation symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        let name = name.into();
        debug_assert!(is_relation(&name), "not a relation name: {}", name);
        PredicateSymbol { name, arity }
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// `left=right`
    Equality(Term, Term),
    /// Relation applied to zero or more terms
    Relation(PredicateSymbol, Vec<Term>),
    /// Negation
    Not(Box<Formula>),
    /// `(left op right)`
    Binary(Connective, Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn equality(left: Term, right: Term) -> Formula {
        Formula::Equality(left, right)
    }

    pub fn relation(name: impl Into<String>, args: Vec<Term>) -> Formula {
        Formula::Relation(PredicateSymbol::new(name, args.len()), args)
    }

    pub fn not(formula: Formula) -> Formula {
        Formula::Not(Box::new(formula))
    }

    pub fn binary(op: Connective, left: Formula, right: Formula) -> Formula {
        Formula::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::binary(Connective::And, left, right)
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::binary(Connective::Or, left, right)
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Formula {
        Formula::binary(Connective::Implies, antecedent, consequent)
    }

    pub fn quantified(quantifier: Quantifier, variable: Variable, predicate: Formula) -> Formula {
        Formula::Quantified(quantifier, variable, Box::new(predicate))
    }

    pub fn forall(variable: Variable, predicate: Formula) -> Formula {
        Formula::quantified(Quantifier::Forall, variable, predicate)
    }

    pub fn exists(variable: Variable, predicate: Formula) -> Formula {
        Formula::quantified(Quantifier::Exists, variable, predicate)
    }

    /// The two sides of an equality
    pub fn as_equality(&self) -> Option<(&Term, &Term)> {
        match self {
            Formula::Equality(left, right) => Some((left, right)),
            _ => None,
        }
    }

    /// Antecedent and consequent of an implication
    pub fn as_implication(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::Binary(Connective::Implies, antecedent, consequent) => {
                Some((antecedent, consequent))
            }
            _ => None,
        }
    }

    /// Bound variable and predicate of a formula quantified by `quantifier`
    pub fn as_quantified(&self, quantifier: Quantifier) -> Option<(&Variable, &Formula)> {
        match self {
            Formula::Quantified(q, variable, predicate) if *q == quantifier => {
                Some((variable, predicate))
            }
            _ => None,
        }
    }

    /// Get all constant names in the formula
    pub fn constants(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.walk_terms(&mut |t| t.collect_constants(&mut names));
        names
    }

    /// Get all variable names in the formula, bound or free
    pub fn variables(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut HashSet<String>) {
        match self {
            Formula::Equality(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Formula::Relation(_, args) => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
            Formula::Not(f) => f.collect_variables(names),
            Formula::Binary(_, f1, f2) => {
                f1.collect_variables(names);
                f2.collect_variables(names);
            }
            Formula::Quantified(_, var, f) => {
                names.insert(var.name.clone());
                f.collect_variables(names);
            }
        }
    }

    /// Get all free variable names in the formula
    pub fn free_variables(&self) -> HashSet<String> {
        match self {
            Formula::Equality(left, right) => {
                let mut vars = left.variables();
                right.collect_variables(&mut vars);
                vars
            }
            Formula::Relation(_, args) => {
                let mut vars = HashSet::new();
                for arg in args {
                    arg.collect_variables(&mut vars);
                }
                vars
            }
            Formula::Not(f) => f.free_variables(),
            Formula::Binary(_, f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(&var.name);
                vars
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// Get all function symbols in the formula
    pub fn functions(&self) -> HashSet<FunctionSymbol> {
        let mut symbols = HashSet::new();
        self.walk_terms(&mut |t| t.collect_functions(&mut symbols));
        symbols
    }

    /// Get all relation symbols in the formula (equality is not a relation)
    pub fn relations(&self) -> HashSet<PredicateSymbol> {
        match self {
            Formula::Equality(_, _) => HashSet::new(),
            Formula::Relation(symbol, _) => HashSet::from([symbol.clone()]),
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.relations(),
            Formula::Binary(_, f1, f2) => {
                let mut symbols = f1.relations();
                symbols.extend(f2.relations());
                symbols
            }
        }
    }

    fn walk_terms(&self, visit: &mut dyn FnMut(&Term)) {
        match self {
            Formula::Equality(left, right) => {
                visit(left);
                visit(right);
            }
            Formula::Relation(_, args) => args.iter().for_each(|arg| visit(arg)),
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.walk_terms(visit),
            Formula::Binary(_, f1, f2) => {
                f1.walk_terms(visit);
                f2.walk_terms(visit);
            }
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Equality(left, right) => write!(f, "{}={}", left, right),
            Formula::Relation(symbol, args) => {
                write!(f, "{}(", symbol.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Formula::Not(inner) => write!(f, "~{}", inner),
            Formula::Binary(op, left, right) => write!(f, "({}{}{})", left, op, right),
            Formula::Quantified(q, var, predicate) => write!(f, "{}{}[{}]", q, var, predicate),
        }
    }
}
