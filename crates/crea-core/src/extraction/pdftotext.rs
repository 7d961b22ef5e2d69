use crate::error::CreaError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that `LABEL: value` pairs stay on one line.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CreaError> {
        // The temp file lives only for this call and is removed when dropped.
        let mut tmpfile = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| CreaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| CreaError::Extraction(e.to_string()))?;
        tmpfile
            .flush()
            .map_err(|e| CreaError::Extraction(e.to_string()))?;

        let text = run_pdftotext(tmpfile.path())?;
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path) -> Result<String, CreaError> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CreaError::PdftotextNotFound
            } else {
                CreaError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(CreaError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split pdftotext output into pages (form feed `\x0c` separates pages).
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent::from_text(i + 1, page_text))
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("CONTRATADO: A\n\x0cOFÍCIO - 1/2024\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].lines, vec!["CONTRATADO: A"]);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].lines, vec!["OFÍCIO - 1/2024"]);
    }

    #[test]
    fn test_empty_output_keeps_first_page() {
        let pages = split_pages("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }
}
