use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of labeled-field extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub rules: Vec<ExtractionRuleDef>,
}

/// One label to look for, e.g. `CONTRATADO:` followed by a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionRuleDef {
    pub name: String,
    /// Label text, matched case-insensitively.
    pub label: String,
    /// Punctuation between label and value (`:` or `-`).
    pub delimiter: String,
    pub field: TargetField,
    #[serde(default)]
    pub note: Option<String>,
}

/// Record field a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetField {
    /// Contracted parties, counted as bonds (Vínculos).
    Bonds,
    /// Official notice references (S.I).
    Notices,
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetField::Bonds => write!(f, "Vínculos"),
            TargetField::Notices => write!(f, "S.I"),
        }
    }
}
