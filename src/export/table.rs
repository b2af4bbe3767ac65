//! CSV output: the document/category count matrix and the failure list.

use crate::aggregate::AggregateReport;
use crate::error::{Result, TechScanError};
use std::path::Path;

fn report_error(path: &Path, e: impl std::fmt::Display) -> TechScanError {
    TechScanError::Report(format!("{}: {}", path.display(), e))
}

/// One row per document in frozen (path-sorted) order, one column per
/// category, a per-row total, and a trailing TOTAL row.
pub fn write_matrix(report: &AggregateReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| report_error(path, e))?;

    let mut header = vec!["document".to_string()];
    header.extend(report.categories.iter().cloned());
    header.push("total".to_string());
    writer.write_record(&header).map_err(|e| report_error(path, e))?;

    for row in &report.rows {
        let mut record = vec![row.path.clone()];
        let mut row_total = 0;
        for category in &report.categories {
            let count = row.counts.get(category).copied().unwrap_or(0);
            row_total += count;
            record.push(count.to_string());
        }
        record.push(row_total.to_string());
        writer.write_record(&record).map_err(|e| report_error(path, e))?;
    }

    let mut totals_record = vec!["TOTAL".to_string()];
    let mut grand_total = 0;
    for category in &report.categories {
        let total = report.total(category);
        grand_total += total;
        totals_record.push(total.to_string());
    }
    totals_record.push(grand_total.to_string());
    writer.write_record(&totals_record).map_err(|e| report_error(path, e))?;

    writer.flush().map_err(|e| report_error(path, e))?;
    Ok(())
}

/// Failed documents with reasons. The header is always written, so an
/// all-clean run still produces a well-formed file.
pub fn write_failures(report: &AggregateReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| report_error(path, e))?;

    writer
        .write_record(["document", "reason"])
        .map_err(|e| report_error(path, e))?;

    for failure in &report.failures {
        writer
            .write_record([failure.path.as_str(), failure.reason.as_str()])
            .map_err(|e| report_error(path, e))?;
    }

    writer.flush().map_err(|e| report_error(path, e))?;
    Ok(())
}
