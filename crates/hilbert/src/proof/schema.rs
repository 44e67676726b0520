//! Schemas and their instantiation
//!
//! A schema is a formula template together with the names in it that may be
//! instantiated. Template names come in three kinds, fixed by their lexical
//! category:
//!
//! - variable names, bound to a variable (renaming),
//! - constant names, bound to an arbitrary term,
//! - relation names, bound to a formula. An application `R(t)` of a relation
//!   template is realized as the bound formula with `t` substituted for the
//!   placeholder `_`; a nullary `R()` is realized as the bound formula itself.

use crate::fol::names::{classify, SymbolKind, PLACEHOLDER};
use crate::fol::{ForbiddenVariable, Formula, Substitution, Term, Variable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use thiserror::Error;

/// Why a schema could not be instantiated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("'{0}' is not a template of the schema")]
    UnknownTemplate(String),

    #[error("template '{name}' must be bound to {expected}, found {found}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("relation template '{relation}' is applied to {arity} arguments (at most one allowed)")]
    RelationArity { relation: String, arity: usize },

    #[error("formula for relation template '{relation}' has free variable {variable} bound at the application site")]
    BoundVariableInRelation { relation: String, variable: String },

    #[error(transparent)]
    Capture(#[from] ForbiddenVariable),
}

/// Value bound to a template name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    Variable(Variable),
    Term(Term),
    Formula(Formula),
}

impl Binding {
    fn kind(&self) -> &'static str {
        match self {
            Binding::Variable(_) => "a variable",
            Binding::Term(_) => "a term",
            Binding::Formula(_) => "a formula",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Variable(v) => write!(f, "{}", v),
            Binding::Term(t) => write!(f, "{}", t),
            Binding::Formula(p) => write!(f, "{}", p),
        }
    }
}

/// Binding of template names to values
///
/// Bindings keep their insertion order. Built with the chained helpers:
///
/// ```
/// use hilbert::{Formula, InstantiationMap, Term};
///
/// let map = InstantiationMap::new()
///     .formula("R", Formula::parse("Q(_)").unwrap())
///     .variable("x", "x")
///     .term("c", Term::constant("c"));
/// assert_eq!(map.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstantiationMap {
    bindings: IndexMap<String, Binding>,
}

impl InstantiationMap {
    pub fn new() -> Self {
        InstantiationMap {
            bindings: IndexMap::new(),
        }
    }

    /// Bind a variable template to a variable
    pub fn variable(mut self, name: impl Into<String>, variable: impl Into<String>) -> Self {
        self.insert(name, Binding::Variable(Variable::new(variable)));
        self
    }

    /// Bind a constant template to a term
    pub fn term(mut self, name: impl Into<String>, term: Term) -> Self {
        self.insert(name, Binding::Term(term));
        self
    }

    /// Bind a relation template to a formula
    pub fn formula(mut self, name: impl Into<String>, formula: Formula) -> Self {
        self.insert(name, Binding::Formula(formula));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Binding)> {
        self.bindings.iter()
    }
}

impl FromIterator<(String, Binding)> for InstantiationMap {
    fn from_iter<I: IntoIterator<Item = (String, Binding)>>(iter: I) -> Self {
        InstantiationMap {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for InstantiationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, binding)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} := {}", name, binding)?;
        }
        write!(f, "}}")
    }
}

/// A formula template with the names that may be instantiated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    pub formula: Formula,
    pub templates: BTreeSet<String>,
}

impl Schema {
    pub fn new<I, S>(formula: Formula, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: BTreeSet<String> = templates.into_iter().map(Into::into).collect();
        debug_assert!(
            templates.iter().all(|t| matches!(
                classify(t),
                Some(SymbolKind::Constant | SymbolKind::Variable | SymbolKind::Relation)
            ) && t != PLACEHOLDER),
            "invalid template names: {:?}",
            templates
        );
        Schema { formula, templates }
    }

    /// A schema without templates; its only instance is the formula itself
    pub fn fixed(formula: Formula) -> Self {
        Schema {
            formula,
            templates: BTreeSet::new(),
        }
    }

    /// Instantiate the template with the given map
    ///
    /// Template names missing from the map are left as they are.
    pub fn instantiate(&self, map: &InstantiationMap) -> Result<Formula, InstantiationError> {
        let mut terms = Substitution::new();
        let mut relations = IndexMap::new();
        for (name, binding) in map.iter() {
            if !self.templates.contains(name) {
                return Err(InstantiationError::UnknownTemplate(name.clone()));
            }
            match (classify(name), binding) {
                (Some(SymbolKind::Variable), Binding::Variable(v)) => {
                    terms.insert(name.clone(), Term::Variable(v.clone()))
                }
                (Some(SymbolKind::Constant), Binding::Term(t)) => terms.insert(name.clone(), t.clone()),
                (Some(SymbolKind::Relation), Binding::Formula(f)) => {
                    relations.insert(name.as_str(), f);
                }
                (kind, found) => {
                    let expected = match kind {
                        Some(SymbolKind::Variable) => "a variable",
                        Some(SymbolKind::Constant) => "a term",
                        Some(SymbolKind::Relation) => "a formula",
                        _ => "nothing",
                    };
                    return Err(InstantiationError::KindMismatch {
                        name: name.clone(),
                        expected,
                        found: found.kind(),
                    });
                }
            }
        }
        let instantiator = Instantiator {
            terms: &terms,
            relations: &relations,
        };
        instantiator.formula(&self.formula, &mut Vec::new())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula)?;
        if !self.templates.is_empty() {
            let names: Vec<&str> = self.templates.iter().map(String::as_str).collect();
            write!(f, " [{}]", names.join(","))?;
        }
        Ok(())
    }
}

/// One quantifier crossed on the way down: its variable in the template and
/// in the instance
struct Binder {
    template: String,
    instance: String,
}

struct Instantiator<'a> {
    terms: &'a Substitution,
    relations: &'a IndexMap<&'a str, &'a Formula>,
}

impl Instantiator<'_> {
    fn formula(&self, formula: &Formula, scope: &mut Vec<Binder>) -> Result<Formula, InstantiationError> {
        match formula {
            Formula::Equality(left, right) => Ok(Formula::Equality(
                self.term(left, scope)?,
                self.term(right, scope)?,
            )),
            Formula::Relation(symbol, args) => match self.relations.get(symbol.name.as_str()) {
                Some(body) => self.apply_relation(&symbol.name, body, args, scope),
                None => {
                    let args = args
                        .iter()
                        .map(|arg| self.term(arg, scope))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Formula::Relation(symbol.clone(), args))
                }
            },
            Formula::Not(f) => Ok(Formula::not(self.formula(f, scope)?)),
            Formula::Binary(op, f1, f2) => Ok(Formula::binary(
                *op,
                self.formula(f1, scope)?,
                self.formula(f2, scope)?,
            )),
            Formula::Quantified(q, var, f) => {
                let instance = match self.terms.get(&var.name) {
                    Some(Term::Variable(v)) => v.clone(),
                    _ => var.clone(),
                };
                scope.push(Binder {
                    template: var.name.clone(),
                    instance: instance.name.clone(),
                });
                let predicate = self.formula(f, scope);
                scope.pop();
                Ok(Formula::quantified(*q, instance, predicate?))
            }
        }
    }

    fn apply_relation(
        &self,
        relation: &str,
        body: &Formula,
        args: &[Term],
        scope: &mut Vec<Binder>,
    ) -> Result<Formula, InstantiationError> {
        if args.len() > 1 {
            return Err(InstantiationError::RelationArity {
                relation: relation.to_string(),
                arity: args.len(),
            });
        }
        let bound: HashSet<&str> = scope.iter().map(|b| b.instance.as_str()).collect();
        if let Some(variable) = body
            .free_variables()
            .into_iter()
            .filter(|v| bound.contains(v.as_str()))
            .min()
        {
            return Err(InstantiationError::BoundVariableInRelation {
                relation: relation.to_string(),
                variable,
            });
        }
        match args.first() {
            Some(arg) => {
                let arg = self.term(arg, scope)?;
                Ok(body.substitute(&Substitution::single(PLACEHOLDER, arg), &HashSet::new())?)
            }
            None => Ok(body.clone()),
        }
    }

    fn term(&self, term: &Term, scope: &[Binder]) -> Result<Term, ForbiddenVariable> {
        match term {
            Term::Constant(c) => match self.terms.get(&c.name) {
                Some(replacement) => {
                    if let Some(variable) = replacement
                        .variables()
                        .into_iter()
                        .filter(|v| scope.iter().any(|b| &b.instance == v))
                        .min()
                    {
                        return Err(ForbiddenVariable { variable });
                    }
                    Ok(replacement.clone())
                }
                None => Ok(term.clone()),
            },
            Term::Variable(v) => Ok(Term::Variable(Variable::new(self.variable(&v.name, scope)?))),
            Term::Function(f, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.term(arg, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Function(f.clone(), args))
            }
        }
    }

    /// Instance name of a variable occurrence
    ///
    /// An occurrence bound in the template follows its binder. A free one is
    /// renamed through the map. Either way the result must not be captured by
    /// a binder nested inside the one it belongs to.
    fn variable(&self, name: &str, scope: &[Binder]) -> Result<String, ForbiddenVariable> {
        let (instance, inner) = match scope.iter().rposition(|b| b.template == name) {
            Some(i) => (scope[i].instance.clone(), &scope[i + 1..]),
            None => {
                let instance = match self.terms.get(name) {
                    Some(Term::Variable(v)) => v.name.clone(),
                    _ => name.to_string(),
                };
                (instance, scope)
            }
        };
        if inner.iter().any(|b| b.instance == instance) {
            return Err(ForbiddenVariable { variable: instance });
        }
        Ok(instance)
    }
}
