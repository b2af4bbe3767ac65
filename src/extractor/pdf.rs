//! PDF extraction strategies.
//!
//! `pdf-extract` handles layout-aware text runs and is tried first; `lopdf`
//! walks page content streams directly and recovers text from some files
//! pdf-extract rejects.

use super::Strategy;
use std::path::Path;

pub struct PdfExtractStrategy;

impl Strategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, path: &Path) -> Result<String, String> {
        pdf_extract::extract_text(path).map_err(|e| e.to_string())
    }
}

pub struct LopdfStrategy;

impl Strategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, path: &Path) -> Result<String, String> {
        let document = lopdf::Document::load(path).map_err(|e| e.to_string())?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Err("document has no pages".to_string());
        }

        document.extract_text(&pages).map_err(|e| e.to_string())
    }
}
