//! Lexical conventions for symbol names
//!
//! The category of a name is determined by its first character, so the
//! constant, variable, function and relation namespaces never overlap:
//!
//! | category | first character | example |
//! |---|---|---|
//! | constant | `0`-`9`, `a`-`d`, or the placeholder `_` | `c`, `0`, `b12` |
//! | variable | `u`-`z` | `x`, `y7` |
//! | function | `f`-`t` | `f`, `plus` |
//! | relation | `F`-`T` | `R`, `Man` |
//!
//! Apart from the placeholder, every name is a non-empty ASCII alphanumeric
//! token.

/// The reserved placeholder constant used in parametrized terms and formulas
pub const PLACEHOLDER: &str = "_";

/// Category of a symbol name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Constant,
    Variable,
    Function,
    Relation,
}

/// Classify a name, or `None` if it belongs to no category
pub fn classify(name: &str) -> Option<SymbolKind> {
    if name == PLACEHOLDER {
        return Some(SymbolKind::Constant);
    }
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    match name.chars().next()? {
        '0'..='9' | 'a'..='d' => Some(SymbolKind::Constant),
        'u'..='z' => Some(SymbolKind::Variable),
        'f'..='t' => Some(SymbolKind::Function),
        'F'..='T' => Some(SymbolKind::Relation),
        _ => None,
    }
}

pub fn is_constant(name: &str) -> bool {
    classify(name) == Some(SymbolKind::Constant)
}

pub fn is_variable(name: &str) -> bool {
    classify(name) == Some(SymbolKind::Variable)
}

pub fn is_function(name: &str) -> bool {
    classify(name) == Some(SymbolKind::Function)
}

pub fn is_relation(name: &str) -> bool {
    classify(name) == Some(SymbolKind::Relation)
}
