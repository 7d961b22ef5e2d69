use crate::error::CreaError;
use crate::rules::schema::RuleSetDef;
use crate::rules::{parse_ruleset_str, RuleSet};

const VINCULOS_JSON: &str = include_str!("../../../../rules/vinculos.json");

/// The ruleset used when no `--rules` file is given.
pub fn default_ruleset_def() -> Result<RuleSetDef, CreaError> {
    parse_ruleset_str(VINCULOS_JSON)
}

/// The default ruleset, compiled.
pub fn default_ruleset() -> Result<RuleSet, CreaError> {
    RuleSet::compile(&default_ruleset_def()?)
}
