//! JSON run summary for the downstream visualization stage: per-category
//! totals in column order plus a cross-corpus ranking of which variants
//! appeared in the most documents.

use crate::aggregate::AggregateReport;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub suspect_extractions: usize,
    pub category_totals: Vec<CategoryTotal>,
    pub ranking: Vec<VariantRank>,
}

#[derive(Debug, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct VariantRank {
    pub variant: String,
    pub category: String,
    /// Number of documents the variant appeared in at least once.
    pub documents: usize,
}

pub fn build_summary(report: &AggregateReport) -> RunSummary {
    let category_totals = report
        .categories
        .iter()
        .map(|category| CategoryTotal {
            category: category.clone(),
            total: report.total(category),
        })
        .collect();

    let mut ranking: Vec<VariantRank> = report
        .variant_documents
        .iter()
        .flat_map(|(category, per_variant)| {
            per_variant.iter().map(|(variant, documents)| VariantRank {
                variant: variant.clone(),
                category: category.clone(),
                documents: *documents,
            })
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.documents
            .cmp(&a.documents)
            .then_with(|| a.variant.cmp(&b.variant))
            .then_with(|| a.category.cmp(&b.category))
    });

    RunSummary {
        generated_at: chrono::Local::now().to_rfc3339(),
        documents_processed: report.rows.len(),
        documents_failed: report.failures.len(),
        suspect_extractions: report.suspect_count(),
        category_totals,
        ranking,
    }
}

pub fn write_summary(report: &AggregateReport, path: &Path) -> Result<()> {
    let summary = build_summary(report);
    let json = serde_json::to_vec_pretty(&summary)?;
    std::fs::write(path, json).map_err(|e| {
        crate::error::TechScanError::Report(format!("{}: {}", path.display(), e))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{DocumentMatches, ReportBuilder};
    use crate::extractor::ExtractionStatus;
    use crate::matcher::scan_text;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn test_ranking_sorted_by_document_count() {
        let tax = Taxonomy::parse("lenguajes: [java, python]\n").unwrap();
        let mut builder = ReportBuilder::new(&tax);
        for (path, text) in [
            ("a.txt", "python"),
            ("b.txt", "python y java"),
            ("c.txt", "python"),
        ] {
            builder.fold(DocumentMatches {
                path: path.to_string(),
                status: ExtractionStatus::Clean,
                matches: scan_text(text, &tax),
            });
        }

        let summary = build_summary(&builder.freeze());
        assert_eq!(summary.documents_processed, 3);
        assert_eq!(summary.ranking[0].variant, "python");
        assert_eq!(summary.ranking[0].documents, 3);
        assert_eq!(summary.ranking[1].variant, "java");
        assert_eq!(summary.ranking[1].documents, 1);
    }

    #[test]
    fn test_category_totals_keep_taxonomy_order() {
        let tax = Taxonomy::parse("zeta: [zabbix]\nalfa: [ansible]\n").unwrap();
        let summary = build_summary(&ReportBuilder::new(&tax).freeze());
        let order: Vec<&str> = summary
            .category_totals
            .iter()
            .map(|t| t.category.as_str())
            .collect();
        // column order, not alphabetical
        assert_eq!(order, vec!["zeta", "alfa"]);
    }

    #[test]
    fn test_empty_report_summary() {
        let tax = Taxonomy::parse("Java: [java]\n").unwrap();
        let summary = build_summary(&ReportBuilder::new(&tax).freeze());
        assert_eq!(summary.documents_processed, 0);
        assert_eq!(summary.documents_failed, 0);
        assert!(summary.ranking.is_empty());
        assert_eq!(summary.category_totals[0].total, 0);
    }
}
