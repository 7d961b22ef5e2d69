pub mod inspection;
pub mod table;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const TABLE_REPORT_FILENAME: &str = "RESULTADOS_VINCULOS_SI.pdf";
pub const INSPECTION_REPORT_FILENAME: &str = "relatorio_obra.pdf";

/// A problem met while rendering that did not stop the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The configured logo file does not exist.
    LogoMissing { path: PathBuf },
    /// The logo file exists but could not be read or decoded.
    LogoUnreadable { path: PathBuf, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LogoMissing { path } => {
                write!(f, "logo file not found at {}", path.display())
            }
            Diagnostic::LogoUnreadable { path, reason } => {
                write!(f, "failed to load logo {}: {reason}", path.display())
            }
        }
    }
}

/// PDF bytes plus anything the operator should be told about them.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}
