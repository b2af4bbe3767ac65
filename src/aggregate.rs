//! Corpus-level aggregation of per-document match results.
//!
//! `ReportBuilder` is the single synchronization point of the run: workers
//! produce `DocumentMatches` in parallel, the fold loop runs on one thread.
//! The builder is internally consistent after every fold, so an aborted run
//! still leaves a usable partial report and unprocessed documents can be
//! identified by their absence from `rows` and `failures`.

use crate::extractor::ExtractionStatus;
use crate::matcher::MatchResult;
use crate::taxonomy::Taxonomy;
use std::collections::BTreeMap;

/// Per-document input to the fold: path, extraction confidence, hit counts.
#[derive(Debug, Clone)]
pub struct DocumentMatches {
    pub path: String,
    pub status: ExtractionStatus,
    pub matches: MatchResult,
}

/// One row of the final matrix.
#[derive(Debug, Clone)]
pub struct DocumentRow {
    pub path: String,
    pub counts: BTreeMap<String, usize>,
    /// Extraction was doubtful; counts may undershoot.
    pub suspect: bool,
}

#[derive(Debug, Clone)]
pub struct FailedDocument {
    pub path: String,
    pub reason: String,
}

/// Frozen aggregation: totals, the per-document matrix sorted by path, and
/// the documents that never produced text.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Column order, as configured in the taxonomy.
    pub categories: Vec<String>,
    pub totals: BTreeMap<String, usize>,
    pub rows: Vec<DocumentRow>,
    pub failures: Vec<FailedDocument>,
    /// category -> variant -> number of documents containing it.
    pub variant_documents: BTreeMap<String, BTreeMap<String, usize>>,
}

impl AggregateReport {
    pub fn total(&self, category: &str) -> usize {
        self.totals.get(category).copied().unwrap_or(0)
    }

    pub fn suspect_count(&self) -> usize {
        self.rows.iter().filter(|r| r.suspect).count()
    }

    /// Totals must equal the column sums of the matrix, exactly.
    pub fn totals_match_matrix(&self) -> bool {
        self.categories.iter().all(|category| {
            let column_sum: usize = self
                .rows
                .iter()
                .map(|row| row.counts.get(category).copied().unwrap_or(0))
                .sum();
            self.total(category) == column_sum
        })
    }
}

/// Accumulates match results and failures, then freezes into a report.
#[derive(Debug)]
pub struct ReportBuilder {
    categories: Vec<String>,
    rows: Vec<DocumentRow>,
    failures: Vec<FailedDocument>,
    variant_documents: BTreeMap<String, BTreeMap<String, usize>>,
}

impl ReportBuilder {
    pub fn new(taxonomy: &Taxonomy) -> Self {
        Self {
            categories: taxonomy.category_names(),
            rows: Vec::new(),
            failures: Vec::new(),
            variant_documents: BTreeMap::new(),
        }
    }

    /// Fold one successfully matched document into the report.
    pub fn fold(&mut self, document: DocumentMatches) {
        for (category, variants) in &document.matches.matched_variants {
            let per_variant = self.variant_documents.entry(category.clone()).or_default();
            for variant in variants {
                *per_variant.entry(variant.clone()).or_insert(0) += 1;
            }
        }

        self.rows.push(DocumentRow {
            path: document.path,
            counts: document.matches.counts,
            suspect: document.status == ExtractionStatus::Suspect,
        });
    }

    /// Record a document whose extraction failed. It contributes to no
    /// counts; the run carries on.
    pub fn fold_failure(&mut self, path: String, reason: String) {
        self.failures.push(FailedDocument { path, reason });
    }

    /// Finalize: sort deterministically and compute exact column totals.
    pub fn freeze(mut self) -> AggregateReport {
        self.rows.sort_by(|a, b| a.path.cmp(&b.path));
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));

        let mut totals = BTreeMap::new();
        for category in &self.categories {
            let column_sum: usize = self
                .rows
                .iter()
                .map(|row| row.counts.get(category).copied().unwrap_or(0))
                .sum();
            totals.insert(category.clone(), column_sum);
        }

        AggregateReport {
            categories: self.categories,
            totals,
            rows: self.rows,
            failures: self.failures,
            variant_documents: self.variant_documents,
        }
    }
}
