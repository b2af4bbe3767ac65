//! Corpus discovery: find candidate documents under the input folder.

use crate::error::{Result, TechScanError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions scanned when no `--pattern` is given.
pub const DEFAULT_EXTENSIONS: &str = "pdf,txt";

/// Parse a comma-separated extension list (`"pdf,txt"`) into lowercase
/// extensions without dots.
pub fn parse_extensions(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Collect matching document paths directly under `folder`, sorted by path
/// so every run visits the corpus in the same order.
pub fn scan_folder(folder: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(TechScanError::FolderNotFound(folder.display().to_string()));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if extensions.iter().any(|e| *e == ext) {
                documents.push(path.to_path_buf());
            }
        }
    }

    documents.sort();

    Ok(documents)
}
