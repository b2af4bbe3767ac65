//! Document text extraction.
//!
//! The input corpus comes straight off procurement portals and is not
//! validated: truncated PDFs, image-only scans, stray encodings. Each file
//! type gets an ordered chain of extraction strategies; a strategy failure
//! moves on to the next, and only a fully exhausted chain reports the
//! document as failed. A single corrupt file must never take down a batch.

mod pdf;
mod text;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Confidence in an extraction that produced text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// One strategy produced text of plausible size.
    Clean,
    /// Strategies disagreed, or the text is suspiciously small for the
    /// file size (typical of image-only scans with a text overlay).
    Suspect,
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub status: ExtractionStatus,
}

/// Terminal extraction failure, recorded per document and reported to the
/// operator. Not a crate error: the run continues.
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    pub reason: String,
}

impl std::fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// A single way of turning a file into text.
trait Strategy: Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, path: &Path) -> std::result::Result<String, String>;
}

/// Extracted text must be at least this fraction of the file size
/// (1/200th) before it is trusted as a full extraction.
const MIN_TEXT_RATIO_DIVISOR: u64 = 200;

/// Extract text from a document, trying each strategy for its file type in
/// order. Never panics; all library failures are captured in the result.
pub fn extract(path: &Path) -> std::result::Result<ExtractedText, ExtractionFailure> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| ExtractionFailure {
            reason: format!("cannot stat file: {}", e),
        })?
        .len();

    let chain = strategy_chain(path).ok_or_else(|| ExtractionFailure {
        reason: format!("unsupported file type: {}", path.display()),
    })?;

    let mut reasons: Vec<String> = Vec::new();
    let mut short_candidate: Option<String> = None;

    for strategy in chain {
        let text = match run_contained(*strategy, path) {
            Ok(t) => t,
            Err(reason) => {
                reasons.push(format!("{}: {}", strategy.name(), reason));
                continue;
            }
        };

        if text.trim().is_empty() {
            reasons.push(format!("{}: produced no text", strategy.name()));
            continue;
        }

        if plausible_length(text.len() as u64, file_size) && short_candidate.is_none() {
            return Ok(ExtractedText {
                text,
                status: ExtractionStatus::Clean,
            });
        }

        // keep the longest of the doubtful outputs and let the chain continue
        short_candidate = Some(match short_candidate.take() {
            Some(prev) if prev.len() >= text.len() => prev,
            _ => text,
        });
    }

    match short_candidate {
        Some(text) => Ok(ExtractedText {
            text,
            status: ExtractionStatus::Suspect,
        }),
        None => Err(ExtractionFailure {
            reason: if reasons.is_empty() {
                "no extraction strategy produced text".to_string()
            } else {
                reasons.join("; ")
            },
        }),
    }
}

fn strategy_chain(path: &Path) -> Option<&'static [&'static dyn Strategy]> {
    static PDF_CHAIN: &[&dyn Strategy] = &[&pdf::PdfExtractStrategy, &pdf::LopdfStrategy];
    static TEXT_CHAIN: &[&dyn Strategy] = &[&text::Utf8Strategy, &text::Latin1Strategy];

    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "pdf" => Some(PDF_CHAIN),
        "txt" | "text" => Some(TEXT_CHAIN),
        _ => None,
    }
}

/// pdf-extract is known to panic on malformed cross-reference tables;
/// contain that and turn it into an ordinary strategy failure.
fn run_contained(strategy: &dyn Strategy, path: &Path) -> std::result::Result<String, String> {
    match catch_unwind(AssertUnwindSafe(|| strategy.extract(path))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(format!("panicked: {}", msg))
        }
    }
}

fn plausible_length(text_len: u64, file_size: u64) -> bool {
    text_len.saturating_mul(MIN_TEXT_RATIO_DIVISOR) >= file_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_plausible_length() {
        assert!(plausible_length(1000, 100_000));
        assert!(plausible_length(500, 100_000));
        assert!(!plausible_length(100, 100_000));
        // tiny files are always plausible
        assert!(plausible_length(5, 5));
    }

    #[test]
    fn test_extract_utf8_text() {
        let dir = std::env::temp_dir().join("techscan-test-extract-utf8");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.txt");
        fs::write(&path, "El proyecto usa Java y Python.").unwrap();

        let extracted = extract(&path).unwrap();
        assert_eq!(extracted.status, ExtractionStatus::Clean);
        assert!(extracted.text.contains("Java"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_extract_latin1_fallback() {
        let dir = std::env::temp_dir().join("techscan-test-extract-latin1");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.txt");
        // "Informática" in ISO-8859-1: 0xE1 is not valid UTF-8
        fs::write(&path, b"Inform\xe1tica y bases de datos Oracle").unwrap();

        let extracted = extract(&path).unwrap();
        assert!(extracted.text.contains("Informática"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_extract_garbage_pdf_fails() {
        let dir = std::env::temp_dir().join("techscan-test-extract-garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.pdf");
        fs::write(&path, b"this is not a pdf at all").unwrap();

        let failure = extract(&path).unwrap_err();
        assert!(failure.reason.contains("pdf-extract"));
        assert!(failure.reason.contains("lopdf"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_extract_missing_file_fails() {
        let result = extract(Path::new("/nonexistent/doc.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_unsupported_extension_fails() {
        let dir = std::env::temp_dir().join("techscan-test-extract-unsupported");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("doc.docx");
        fs::write(&path, b"zip bytes").unwrap();

        let failure = extract(&path).unwrap_err();
        assert!(failure.reason.contains("unsupported file type"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_file_fails() {
        let dir = std::env::temp_dir().join("techscan-test-extract-empty");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.txt");
        fs::write(&path, b"").unwrap();

        let failure = extract(&path).unwrap_err();
        assert!(failure.reason.contains("produced no text"));

        fs::remove_dir_all(&dir).ok();
    }
}
