use crate::error::CreaError;
use crate::extraction::{PageContent, PdfExtractor};

/// Pure-Rust extraction backend built on `lopdf`.
///
/// Loses the column layout pdftotext keeps, but needs nothing installed.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CreaError> {
        let doc = lopdf::Document::load_mem(pdf_bytes)
            .map_err(|e| CreaError::Extraction(format!("failed to load PDF: {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(CreaError::Extraction("PDF has no pages".into()));
        }

        page_numbers
            .iter()
            .map(|&n| {
                let text = doc.extract_text(&[n]).map_err(|e| {
                    CreaError::Extraction(format!("failed to extract text from page {n}: {e}"))
                })?;
                Ok(PageContent::from_text(n as usize, &text))
            })
            .collect()
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = LopdfExtractor::new()
            .extract_pages(b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, CreaError::Extraction(_)));
    }
}
