//! Capture-avoiding substitution
//!
//! A substitution maps constant names and variable names to terms. Applying
//! it replaces every constant occurrence and every free variable occurrence
//! whose name is mapped. Only occurrences that originate in the subject are
//! replaced; terms inserted by the substitution are never revisited.
//!
//! Replacements are checked against a set of forbidden variable names. When
//! descending below `Qx[...]`, `x` stops being substitutable and becomes
//! forbidden, so a replacement that mentions `x` would be captured and the
//! substitution fails with [`ForbiddenVariable`].

use super::formula::Formula;
use super::names::{is_constant, is_variable};
use super::term::Term;
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

/// The capture fault: a replacement term contains a forbidden variable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("substituted term contains forbidden variable {variable}")]
pub struct ForbiddenVariable {
    pub variable: String,
}

/// A substitution mapping constant and variable names to terms
///
/// Entries keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub map: IndexMap<String, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// A substitution with a single mapping
    pub fn single(name: impl Into<String>, term: Term) -> Self {
        let mut subst = Substitution::new();
        subst.insert(name, term);
        subst
    }

    /// Add a name -> term mapping
    pub fn insert(&mut self, name: impl Into<String>, term: Term) {
        let name = name.into();
        debug_assert!(
            is_constant(&name) || is_variable(&name),
            "only constants and variables can be substituted: {}",
            name
        );
        self.map.insert(name, term);
    }

    /// Get the term for a name, if mapped
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.map.get(name)
    }

    /// Check if a name is mapped
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.map.iter()
    }

    /// Copy of this substitution without a mapping for `name`
    fn without(&self, name: &str) -> Substitution {
        let mut map = self.map.clone();
        map.shift_remove(name);
        Substitution { map }
    }
}

impl FromIterator<(String, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        let mut subst = Substitution::new();
        for (name, term) in iter {
            subst.insert(name, term);
        }
        subst
    }
}

/// Fail if `replacement` mentions a forbidden variable
///
/// Reports the lexicographically smallest offender so that failures are
/// reproducible.
fn check_forbidden(replacement: &Term, forbidden: &HashSet<String>) -> Result<(), ForbiddenVariable> {
    if forbidden.is_empty() {
        return Ok(());
    }
    match replacement
        .variables()
        .into_iter()
        .filter(|v| forbidden.contains(v))
        .min()
    {
        Some(variable) => Err(ForbiddenVariable { variable }),
        None => Ok(()),
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn substitute(
        &self,
        subst: &Substitution,
        forbidden: &HashSet<String>,
    ) -> Result<Term, ForbiddenVariable> {
        match self {
            Term::Variable(_) | Term::Constant(_) => match subst.get(self.root_name()) {
                Some(replacement) => {
                    check_forbidden(replacement, forbidden)?;
                    Ok(replacement.clone())
                }
                None => Ok(self.clone()),
            },
            Term::Function(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.substitute(subst, forbidden))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Function(f.clone(), new_args))
            }
        }
    }
}

impl Formula {
    /// Apply a substitution to the constants and free variables of this formula
    pub fn substitute(
        &self,
        subst: &Substitution,
        forbidden: &HashSet<String>,
    ) -> Result<Formula, ForbiddenVariable> {
        match self {
            Formula::Equality(left, right) => Ok(Formula::Equality(
                left.substitute(subst, forbidden)?,
                right.substitute(subst, forbidden)?,
            )),
            Formula::Relation(symbol, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.substitute(subst, forbidden))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Formula::Relation(symbol.clone(), new_args))
            }
            Formula::Not(f) => Ok(Formula::not(f.substitute(subst, forbidden)?)),
            Formula::Binary(op, f1, f2) => Ok(Formula::binary(
                *op,
                f1.substitute(subst, forbidden)?,
                f2.substitute(subst, forbidden)?,
            )),
            Formula::Quantified(q, var, f) => {
                let mut inner_forbidden = forbidden.clone();
                inner_forbidden.insert(var.name.clone());
                let predicate = if subst.contains(&var.name) {
                    f.substitute(&subst.without(&var.name), &inner_forbidden)?
                } else {
                    f.substitute(subst, &inner_forbidden)?
                };
                Ok(Formula::quantified(*q, var.clone(), predicate))
            }
        }
    }
}
