use crea_core::error::CreaError;
use crea_core::rules::builtin;
use crea_core::rules::schema::{RuleSetDef, TargetField};
use std::path::Path;

use crate::output;

pub fn list() -> Result<(), CreaError> {
    let rs = builtin::default_ruleset_def()?;
    describe(&rs);
    Ok(())
}

pub fn show() -> Result<(), CreaError> {
    output::json::print(&builtin::default_ruleset_def()?)
}

pub fn validate(file: &Path) -> Result<(), CreaError> {
    let rs = crea_core::rules::load_ruleset(file)?;

    println!("Ruleset '{}' (v{}) is valid.", rs.name, rs.version);
    println!("  Rules: {}", rs.rules.len());

    // A ruleset feeding only one column leaves the other at 0 for every document.
    let mut warnings = Vec::new();
    for field in [TargetField::Bonds, TargetField::Notices] {
        if !rs.rules.iter().any(|r| r.field == field) {
            warnings.push(format!("no rule fills the '{field}' column"));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn describe(rs: &RuleSetDef) {
    println!("{} (version {})\n", rs.name, rs.version);
    if let Some(ref desc) = rs.description {
        println!("{}\n", desc);
    }

    let max_name = rs.rules.iter().map(|r| r.name.len()).max().unwrap_or(10);
    for rule in &rs.rules {
        println!(
            "  {:<width$}  {} {} <value>  -> {}",
            rule.name,
            rule.label,
            rule.delimiter,
            rule.field,
            width = max_name
        );
        if let Some(ref note) = rule.note {
            println!("  {:<width$}  {}", "", note, width = max_name);
        }
    }
    println!();
    println!("Labels match case-insensitively; the value runs to the end of the line.");
}
