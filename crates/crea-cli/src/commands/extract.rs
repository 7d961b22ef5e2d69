use crea_core::config::Config;
use crea_core::error::CreaError;
use crea_core::extraction::{make_extractor, Backend};
use crea_core::report::table::render_table;
use crea_core::report::TABLE_REPORT_FILENAME;
use crea_core::rules::{self, builtin, RuleSet};
use crea_core::spreadsheet::{write_xlsx, SPREADSHEET_FILENAME};
use crea_core::{process_batch, InputDocument, SkippedDocument};
use std::path::{Path, PathBuf};

use crate::output::{self, OutputFormat};

pub struct ExtractOptions {
    pub files: Vec<PathBuf>,
    pub rules: Option<PathBuf>,
    pub xlsx: bool,
    pub pdf: bool,
    pub out_dir: Option<PathBuf>,
    pub output: OutputFormat,
    pub extractor: Option<String>,
}

pub fn run(config: &Config, opts: ExtractOptions) -> Result<(), CreaError> {
    let backend = match opts.extractor.as_deref() {
        Some(name) => Backend::from_str_loose(name).ok_or_else(|| {
            CreaError::Extraction(format!(
                "unknown extractor '{name}' (expected auto, pdftotext or lopdf)"
            ))
        })?,
        None => config.extractor,
    };
    let extractor = make_extractor(backend);
    let ruleset = load_rules(opts.rules.as_deref().or(config.rules_path.as_deref()))?;

    let (documents, unreadable) = read_documents(&opts.files);

    let mut result = process_batch(&documents, extractor.as_ref(), &ruleset);
    result.skipped.splice(0..0, unreadable);

    match opts.output {
        OutputFormat::Json => output::json::print(&result)?,
        OutputFormat::Table => output::table::print_batch(&result),
    }

    let out_dir = opts.out_dir.as_deref().unwrap_or(config.output_dir.as_path());
    if opts.xlsx || opts.pdf {
        std::fs::create_dir_all(out_dir)?;
    }
    if opts.xlsx {
        let path = out_dir.join(SPREADSHEET_FILENAME);
        std::fs::write(&path, write_xlsx(&result.table)?)?;
        log::info!("spreadsheet written to {}", path.display());
    }
    if opts.pdf {
        let path = out_dir.join(TABLE_REPORT_FILENAME);
        std::fs::write(&path, render_table(&result.table)?)?;
        log::info!("report written to {}", path.display());
    }

    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet, CreaError> {
    match path {
        Some(path) => {
            let def = rules::load_ruleset(path)?;
            log::debug!("using ruleset '{}' from {}", def.name, path.display());
            RuleSet::compile(&def)
        }
        None => builtin::default_ruleset(),
    }
}

/// Reads every input in order. A file that cannot be read is reported as
/// skipped and the rest are still read.
fn read_documents(paths: &[PathBuf]) -> (Vec<InputDocument>, Vec<SkippedDocument>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for path in paths {
        let filename = display_name(path);
        match std::fs::read(path) {
            Ok(bytes) => documents.push(InputDocument::new(filename, bytes)),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                skipped.push(SkippedDocument {
                    filename,
                    reason: format!("could not read file: {e}"),
                });
            }
        }
    }
    (documents, skipped)
}

/// Filename column value: the file's name without its directory.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_file_is_skipped_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.pdf");
        std::fs::write(&present, b"%PDF-1.4").unwrap();
        let missing = dir.path().join("missing.pdf");

        let (documents, skipped) = read_documents(&[missing, present]);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].filename, "a.pdf");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].filename, "missing.pdf");
        assert!(skipped[0].reason.starts_with("could not read file"));
    }

    #[test]
    fn test_display_name_drops_directory() {
        assert_eq!(display_name(Path::new("lotes/2024/b.pdf")), "b.pdf");
    }
}
