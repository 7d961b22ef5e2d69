use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CreaError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load ruleset from {path}: {reason}")]
    RulesetLoad { path: PathBuf, reason: String },

    #[error("invalid ruleset: {0}")]
    RulesetInvalid(String),

    #[error("missing mandatory field(s): {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("invalid value '{value}' for {field}; expected one of: {expected}")]
    InvalidChoice {
        field: String,
        value: String,
        expected: String,
    },

    #[error("invalid CEP '{0}': expected 8 digits")]
    InvalidCep(String),

    #[error("CEP {0} not found")]
    CepNotFound(String),

    #[error("address lookup failed: {0}")]
    Lookup(String),

    #[error("failed to render report: {0}")]
    Render(String),

    #[error("failed to write spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
