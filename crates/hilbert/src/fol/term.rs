//! Terms in first-order logic

use super::names::{is_constant, is_function, is_variable, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_variable(&name), "not a variable name: {}", name);
        Variable { name }
    }
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_constant(&name), "not a constant name: {}", name);
        Constant { name }
    }

    /// The placeholder constant `_`
    pub fn placeholder() -> Self {
        Constant {
            name: PLACEHOLDER.to_string(),
        }
    }
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        let name = name.into();
        debug_assert!(is_function(&name), "not a function name: {}", name);
        FunctionSymbol { name, arity }
    }
}

/// A term in first-order logic
///
/// Function applications always carry at least one argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Build a variable term
    pub fn variable(name: impl Into<String>) -> Term {
        Term::Variable(Variable::new(name))
    }

    /// Build a constant term
    pub fn constant(name: impl Into<String>) -> Term {
        Term::Constant(Constant::new(name))
    }

    /// The placeholder constant `_`
    pub fn placeholder() -> Term {
        Term::Constant(Constant::placeholder())
    }

    /// Build a function application
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Term {
        assert!(!args.is_empty(), "function application needs arguments");
        Term::Function(FunctionSymbol::new(name, args.len()), args)
    }

    /// Name of the symbol at the root of this term
    pub fn root_name(&self) -> &str {
        match self {
            Term::Variable(v) => &v.name,
            Term::Constant(c) => &c.name,
            Term::Function(f, _) => &f.name,
        }
    }

    /// Get all constant names in this term
    pub fn constants(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_constants(&mut names);
        names
    }

    /// Get all variable names in this term
    ///
    /// Terms have no binders, so these are also the free variables.
    pub fn variables(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.collect_variables(&mut names);
        names
    }

    /// Get all function symbols in this term
    pub fn functions(&self) -> HashSet<FunctionSymbol> {
        let mut symbols = HashSet::new();
        self.collect_functions(&mut symbols);
        symbols
    }

    pub(crate) fn collect_constants(&self, names: &mut HashSet<String>) {
        match self {
            Term::Variable(_) => {}
            Term::Constant(c) => {
                names.insert(c.name.clone());
            }
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_constants(names);
                }
            }
        }
    }

    /// Collect all variable names in this term
    pub fn collect_variables(&self, names: &mut HashSet<String>) {
        match self {
            Term::Variable(v) => {
                names.insert(v.name.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
        }
    }

    pub(crate) fn collect_functions(&self, symbols: &mut HashSet<FunctionSymbol>) {
        if let Term::Function(f, args) = self {
            symbols.insert(f.clone());
            for arg in args {
                arg.collect_functions(symbols);
            }
        }
    }
}

// Display implementations produce the canonical textual form

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
