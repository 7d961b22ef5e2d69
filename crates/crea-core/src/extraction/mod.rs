pub mod lopdf_text;
pub mod pdftotext;

use crate::error::CreaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    /// Split raw page text into lines.
    pub fn from_text(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CreaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Which extraction backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// pdftotext when installed, lopdf otherwise.
    #[default]
    Auto,
    Pdftotext,
    Lopdf,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Auto => write!(f, "auto"),
            Backend::Pdftotext => write!(f, "pdftotext"),
            Backend::Lopdf => write!(f, "lopdf"),
        }
    }
}

impl Backend {
    pub fn from_str_loose(s: &str) -> Option<Backend> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Backend::Auto),
            "pdftotext" | "poppler" => Some(Backend::Pdftotext),
            "lopdf" | "builtin" => Some(Backend::Lopdf),
            _ => None,
        }
    }
}

/// Instantiate the extractor for `backend`.
pub fn make_extractor(backend: Backend) -> Box<dyn PdfExtractor> {
    match backend {
        Backend::Pdftotext => Box::new(pdftotext::PdftotextExtractor::new()),
        Backend::Lopdf => Box::new(lopdf_text::LopdfExtractor::new()),
        Backend::Auto => {
            if pdftotext::PdftotextExtractor::is_available() {
                Box::new(pdftotext::PdftotextExtractor::new())
            } else {
                log::info!("pdftotext not available, falling back to lopdf text extraction");
                Box::new(lopdf_text::LopdfExtractor::new())
            }
        }
    }
}
