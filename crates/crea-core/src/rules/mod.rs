pub mod builtin;
pub mod schema;

use crate::error::CreaError;
use regex::Regex;
use schema::{ExtractionRuleDef, RuleSetDef, TargetField};
use std::collections::HashSet;
use std::path::Path;

/// Load a ruleset from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSetDef, CreaError> {
    let content = std::fs::read_to_string(path).map_err(|e| CreaError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a ruleset from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSetDef, CreaError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(|e| CreaError::RulesetLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a ruleset from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSetDef, CreaError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(CreaError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Validate that a ruleset is well-formed.
pub fn validate_ruleset(ruleset: &RuleSetDef) -> Result<(), CreaError> {
    if ruleset.rules.is_empty() {
        return Err(CreaError::RulesetInvalid("rules must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for rule in &ruleset.rules {
        if rule.name.trim().is_empty() {
            return Err(CreaError::RulesetInvalid(
                "rule name must not be empty".into(),
            ));
        }
        if !seen.insert(rule.name.as_str()) {
            return Err(CreaError::RulesetInvalid(format!(
                "duplicate rule name '{}'",
                rule.name
            )));
        }
        if rule.label.trim().is_empty() {
            return Err(CreaError::RulesetInvalid(format!(
                "rule '{}' has an empty label",
                rule.name
            )));
        }
        if rule.delimiter.trim().is_empty() {
            return Err(CreaError::RulesetInvalid(format!(
                "rule '{}' has an empty delimiter",
                rule.name
            )));
        }
        compile_pattern(rule)?;
    }

    Ok(())
}

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub field: TargetField,
    pattern: Regex,
}

impl CompiledRule {
    /// Trimmed, non-empty values following every occurrence of the label.
    pub fn captures(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// A validated ruleset ready to run against document text.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: String,
    pub rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn compile(def: &RuleSetDef) -> Result<RuleSet, CreaError> {
        validate_ruleset(def)?;
        let rules = def
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    name: rule.name.clone(),
                    field: rule.field,
                    pattern: compile_pattern(rule)?,
                })
            })
            .collect::<Result<Vec<_>, CreaError>>()?;
        Ok(RuleSet {
            name: def.name.clone(),
            rules,
        })
    }
}

/// `<label>\s*<delimiter>\s*<value up to end of line>`, case-insensitive.
///
/// The whitespace may span line breaks, so a value printed on the line after
/// its label is still found.
fn compile_pattern(rule: &ExtractionRuleDef) -> Result<Regex, CreaError> {
    let pattern = format!(
        r"(?i){}\s*{}\s*([^\r\n]*)",
        regex::escape(rule.label.trim()),
        regex::escape(rule.delimiter.trim()),
    );
    Regex::new(&pattern).map_err(|e| {
        CreaError::RulesetInvalid(format!("rule '{}' has an invalid pattern: {e}", rule.name))
    })
}
