pub mod aggregate;
pub mod cep;
pub mod config;
pub mod error;
pub mod extraction;
pub mod form;
pub mod model;
pub mod parsing;
pub mod pdf;
pub mod report;
pub mod rules;
pub mod spreadsheet;

use error::CreaError;
use extraction::PdfExtractor;
use model::{AggregatedTable, DocumentRecord};
use rules::RuleSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// A PDF handed in by the operator, identified by its filename.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl InputDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        InputDocument {
            filename: filename.into(),
            bytes,
        }
    }
}

/// A document left out of the table because its text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

/// Outcome of processing a whole selection of documents.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub table: AggregatedTable,
    pub skipped: Vec<SkippedDocument>,
    /// Filenames that appear more than once in the table.
    pub duplicate_filenames: Vec<String>,
}

/// Extract text from one PDF and apply `ruleset` to it.
pub fn extract_document(
    document: &InputDocument,
    extractor: &dyn PdfExtractor,
    ruleset: &RuleSet,
) -> Result<DocumentRecord, CreaError> {
    let pages = extractor.extract_pages(&document.bytes)?;
    log::debug!(
        "{}: {} page(s) via {}",
        document.filename,
        pages.len(),
        extractor.backend_name()
    );
    Ok(parsing::extract_record_from_pages(
        &document.filename,
        &pages,
        ruleset,
    ))
}

/// Main API entry point: process every document in selection order and
/// aggregate the records into one table.
///
/// A document whose extraction fails is skipped and reported in
/// `BatchResult::skipped`; the rest of the batch is still processed.
pub fn process_batch(
    documents: &[InputDocument],
    extractor: &dyn PdfExtractor,
    ruleset: &RuleSet,
) -> BatchResult {
    let mut records = Vec::with_capacity(documents.len());
    let mut skipped = Vec::new();

    for document in documents {
        match extract_document(document, extractor, ruleset) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("skipping {}: {e}", document.filename);
                skipped.push(SkippedDocument {
                    filename: document.filename.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let duplicate_filenames = duplicates(&records);
    for name in &duplicate_filenames {
        log::warn!("{name} appears more than once; each copy is kept as its own row");
    }

    BatchResult {
        table: aggregate::aggregate(records),
        skipped,
        duplicate_filenames,
    }
}

fn duplicates(records: &[DocumentRecord]) -> Vec<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *seen.entry(record.filename.as_str()).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
