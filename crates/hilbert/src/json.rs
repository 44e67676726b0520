//! JSON serialization types for proof data
//!
//! Formulas and terms are stored in their canonical textual form and parsed
//! back when a proof is loaded.

use crate::fol::names::{classify, is_variable, SymbolKind, PLACEHOLDER};
use crate::fol::{Formula, Term, Variable};
use crate::parser::ParseError;
use crate::proof::{Binding, InstantiationMap, Line, Proof, Schema};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or saving JSON proofs
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("cannot bind '{value}' to template '{name}'")]
    InvalidBinding { name: String, value: String },

    #[error("'{0}' cannot be a template name")]
    InvalidTemplate(String),
}

/// JSON representation of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaJson {
    pub formula: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
}

impl From<&Schema> for SchemaJson {
    fn from(schema: &Schema) -> Self {
        SchemaJson {
            formula: schema.formula.to_string(),
            templates: schema.templates.iter().cloned().collect(),
        }
    }
}

impl TryFrom<&SchemaJson> for Schema {
    type Error = JsonError;

    fn try_from(json: &SchemaJson) -> Result<Self, Self::Error> {
        if let Some(name) = json.templates.iter().find(|name| {
            name.as_str() == PLACEHOLDER
                || !matches!(
                    classify(name),
                    Some(SymbolKind::Constant | SymbolKind::Variable | SymbolKind::Relation)
                )
        }) {
            return Err(JsonError::InvalidTemplate(name.clone()));
        }
        Ok(Schema::new(Formula::parse(&json.formula)?, json.templates.iter().cloned()))
    }
}

/// JSON representation of a proof line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum LineJson {
    Assumption {
        formula: String,
        assumption: SchemaJson,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        instantiation: IndexMap<String, String>,
    },
    Tautology {
        formula: String,
    },
    #[serde(rename = "MP")]
    ModusPonens {
        formula: String,
        antecedent: usize,
        conditional: usize,
    },
    #[serde(rename = "UG")]
    UniversalGeneralization { formula: String, predicate: usize },
}

impl From<&Line> for LineJson {
    fn from(line: &Line) -> Self {
        match line {
            Line::Assumption {
                formula,
                assumption,
                instantiation,
            } => LineJson::Assumption {
                formula: formula.to_string(),
                assumption: assumption.into(),
                instantiation: instantiation
                    .iter()
                    .map(|(name, binding)| (name.clone(), binding.to_string()))
                    .collect(),
            },
            Line::Tautology { formula } => LineJson::Tautology {
                formula: formula.to_string(),
            },
            Line::ModusPonens {
                formula,
                antecedent,
                conditional,
            } => LineJson::ModusPonens {
                formula: formula.to_string(),
                antecedent: *antecedent,
                conditional: *conditional,
            },
            Line::UniversalGeneralization { formula, predicate } => LineJson::UniversalGeneralization {
                formula: formula.to_string(),
                predicate: *predicate,
            },
        }
    }
}

/// Read a binding back according to the category of the template name
fn parse_binding(name: &str, value: &str) -> Result<Binding, JsonError> {
    let invalid = || JsonError::InvalidBinding {
        name: name.to_string(),
        value: value.to_string(),
    };
    match classify(name) {
        Some(SymbolKind::Variable) if is_variable(value) => Ok(Binding::Variable(Variable::new(value))),
        Some(SymbolKind::Constant) => Ok(Binding::Term(Term::parse(value)?)),
        Some(SymbolKind::Relation) => Ok(Binding::Formula(Formula::parse(value)?)),
        _ => Err(invalid()),
    }
}

impl TryFrom<&LineJson> for Line {
    type Error = JsonError;

    fn try_from(json: &LineJson) -> Result<Self, Self::Error> {
        Ok(match json {
            LineJson::Assumption {
                formula,
                assumption,
                instantiation,
            } => Line::Assumption {
                formula: Formula::parse(formula)?,
                assumption: assumption.try_into()?,
                instantiation: instantiation
                    .iter()
                    .map(|(name, value)| Ok((name.clone(), parse_binding(name, value)?)))
                    .collect::<Result<InstantiationMap, JsonError>>()?,
            },
            LineJson::Tautology { formula } => Line::Tautology {
                formula: Formula::parse(formula)?,
            },
            LineJson::ModusPonens {
                formula,
                antecedent,
                conditional,
            } => Line::ModusPonens {
                formula: Formula::parse(formula)?,
                antecedent: *antecedent,
                conditional: *conditional,
            },
            LineJson::UniversalGeneralization { formula, predicate } => Line::UniversalGeneralization {
                formula: Formula::parse(formula)?,
                predicate: *predicate,
            },
        })
    }
}

/// JSON representation of a proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofJson {
    pub assumptions: Vec<SchemaJson>,
    pub conclusion: String,
    pub lines: Vec<LineJson>,
}

impl From<&Proof> for ProofJson {
    fn from(proof: &Proof) -> Self {
        ProofJson {
            assumptions: proof.assumptions.iter().map(SchemaJson::from).collect(),
            conclusion: proof.conclusion.to_string(),
            lines: proof.lines.iter().map(LineJson::from).collect(),
        }
    }
}

impl TryFrom<&ProofJson> for Proof {
    type Error = JsonError;

    fn try_from(json: &ProofJson) -> Result<Self, Self::Error> {
        let assumptions = json
            .assumptions
            .iter()
            .map(Schema::try_from)
            .collect::<Result<IndexSet<_>, _>>()?;
        let lines = json
            .lines
            .iter()
            .map(Line::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Proof::new(assumptions, Formula::parse(&json.conclusion)?, lines))
    }
}

impl Proof {
    /// Convert to JSON representation
    pub fn to_json(&self) -> ProofJson {
        self.into()
    }

    /// Serialize as pretty-printed JSON text
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    /// Load a proof from JSON text
    pub fn from_json_str(text: &str) -> Result<Proof, JsonError> {
        let json: ProofJson = serde_json::from_str(text)?;
        Proof::try_from(&json)
    }
}
