//! Report serialization: CSV matrix, failed-document list, JSON summary.

pub mod summary;
pub mod table;

use crate::aggregate::AggregateReport;
use crate::error::Result;
use std::path::Path;

pub const MATRIX_FILE: &str = "tech_report.csv";
pub const FAILURES_FILE: &str = "failed_documents.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Write the three report artifacts into `output_dir`, creating it if
/// needed. CSV content is byte-identical across runs over the same corpus.
pub fn write_report(report: &AggregateReport, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        crate::error::TechScanError::Report(format!("{}: {}", output_dir.display(), e))
    })?;

    let matrix_path = output_dir.join(MATRIX_FILE);
    table::write_matrix(report, &matrix_path)?;
    println!("✔ Report: {}", matrix_path.display());

    let failures_path = output_dir.join(FAILURES_FILE);
    table::write_failures(report, &failures_path)?;
    println!("✔ Failures: {}", failures_path.display());

    let summary_path = output_dir.join(SUMMARY_FILE);
    summary::write_summary(report, &summary_path)?;
    println!("✔ Summary: {}", summary_path.display());

    Ok(())
}
