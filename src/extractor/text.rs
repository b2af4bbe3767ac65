//! Plain-text extraction strategies.
//!
//! Portals serve attached text files in a mix of UTF-8 and legacy Windows
//! encodings. Strict UTF-8 is tried first; the fallback decodes as
//! ISO-8859-1, which maps every byte and covers the accented characters
//! found in Spanish administrative text.

use super::Strategy;
use std::path::Path;

pub struct Utf8Strategy;

impl Strategy for Utf8Strategy {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn extract(&self, path: &Path) -> Result<String, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))
    }
}

pub struct Latin1Strategy;

impl Strategy for Latin1Strategy {
    fn name(&self) -> &'static str {
        "latin-1"
    }

    fn extract(&self, path: &Path) -> Result<String, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        // ISO-8859-1 code points coincide with the first 256 Unicode scalars
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}
