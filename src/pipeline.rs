//! Run orchestration: extract and match every document in parallel, then
//! fold the outcomes into a frozen report.
//!
//! Documents are independent and the taxonomy is read-only, so the heavy
//! per-document work fans out over a rayon pool. Outcomes are collected in
//! input order and folded on the calling thread; per-category counts are
//! plain integer sums, so the fold order never changes the totals.

use crate::aggregate::{AggregateReport, DocumentMatches, ReportBuilder};
use crate::error::Result;
use crate::extractor::{self, ExtractionStatus};
use crate::matcher;
use crate::taxonomy::Taxonomy;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Worker threads; `None` uses one per CPU core.
    pub jobs: Option<usize>,
    /// Per-document extraction detail on stdout.
    pub verbose: bool,
}

enum Outcome {
    Matched(DocumentMatches),
    Failed { path: String, reason: String },
}

/// Process the corpus and return the frozen aggregate report.
pub fn run(documents: &[PathBuf], taxonomy: &Taxonomy, options: &ScanOptions) -> Result<AggregateReport> {
    let outcomes = match options.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| crate::error::TechScanError::WorkerPool(e.to_string()))?;
            pool.install(|| process_all(documents, taxonomy, options))
        }
        None => process_all(documents, taxonomy, options),
    };

    let mut builder = ReportBuilder::new(taxonomy);
    for outcome in outcomes {
        match outcome {
            Outcome::Matched(document) => builder.fold(document),
            Outcome::Failed { path, reason } => builder.fold_failure(path, reason),
        }
    }

    Ok(builder.freeze())
}

fn process_all(documents: &[PathBuf], taxonomy: &Taxonomy, options: &ScanOptions) -> Vec<Outcome> {
    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let outcomes: Vec<Outcome> = documents
        .par_iter()
        .map(|path| {
            let outcome = process_document(path, taxonomy, options, &progress);
            progress.inc(1);
            outcome
        })
        .collect();

    progress.finish_and_clear();
    outcomes
}

fn process_document(
    path: &std::path::Path,
    taxonomy: &Taxonomy,
    options: &ScanOptions,
    progress: &ProgressBar,
) -> Outcome {
    let display = path.display().to_string();

    match extractor::extract(path) {
        Ok(extracted) => {
            if options.verbose && extracted.status == ExtractionStatus::Suspect {
                progress.println(format!("⚠ suspect extraction: {}", display));
            }
            // text is dropped here; only the counts travel onward
            let matches = matcher::scan_text(&extracted.text, taxonomy);
            if options.verbose {
                progress.println(format!("✔ {} ({} hits)", display, matches.total_hits()));
            }
            Outcome::Matched(DocumentMatches {
                path: display,
                status: extracted.status,
                matches,
            })
        }
        Err(failure) => {
            if options.verbose {
                progress.println(format!("✖ {}: {}", display, failure));
            }
            Outcome::Failed {
                path: display,
                reason: failure.reason,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn taxonomy() -> Taxonomy {
        Taxonomy::parse("Java: [java]\nPython: [python]\n").unwrap()
    }

    #[test]
    fn test_run_empty_corpus() {
        let report = run(&[], &taxonomy(), &ScanOptions::default()).unwrap();
        assert!(report.rows.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(report.total("Java"), 0);
        assert!(report.totals_match_matrix());
    }

    #[test]
    fn test_run_mixed_corpus() {
        let dir = std::env::temp_dir().join("techscan-test-pipeline-mixed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.txt"), "java y python").unwrap();
        fs::write(dir.join("b.txt"), "solo python").unwrap();
        fs::write(dir.join("broken.pdf"), "not a pdf").unwrap();

        let documents = vec![dir.join("a.txt"), dir.join("b.txt"), dir.join("broken.pdf")];
        let report = run(&documents, &taxonomy(), &ScanOptions::default()).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.total("Java"), 1);
        assert_eq!(report.total("Python"), 2);
        assert!(report.totals_match_matrix());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_with_explicit_jobs() {
        let dir = std::env::temp_dir().join("techscan-test-pipeline-jobs");
        fs::create_dir_all(&dir).unwrap();
        for i in 0..8 {
            fs::write(dir.join(format!("doc{}.txt", i)), "java").unwrap();
        }

        let documents: Vec<PathBuf> = (0..8).map(|i| dir.join(format!("doc{}.txt", i))).collect();
        let options = ScanOptions { jobs: Some(2), verbose: false };
        let report = run(&documents, &taxonomy(), &options).unwrap();

        assert_eq!(report.rows.len(), 8);
        assert_eq!(report.total("Java"), 8);

        fs::remove_dir_all(&dir).ok();
    }
}
