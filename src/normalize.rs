//! Text normalization shared by the taxonomy loader and the matcher.
//!
//! Tender documents are frequently scanned or OCR'd, so accenting and
//! casing are unreliable. Every keyword variant and every document text
//! goes through the same fold before matching: lowercase, diacritics
//! stripped, runs of whitespace collapsed to a single space.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for keyword matching.
///
/// `"Informática  Básica"` becomes `"informatica basica"`.
pub fn normalize(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    // NFD decomposition splits accented letters into base + combining mark
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let lowered = stripped.to_lowercase();

    WHITESPACE_RE
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}
