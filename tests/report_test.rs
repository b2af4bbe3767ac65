//! Full report-writing round trip: scan a corpus, write the artifacts,
//! check their content and byte-level determinism.

use std::fs;
use techscan::export;
use techscan::pipeline::{self, ScanOptions};
use techscan::scanner;
use techscan::taxonomy::Taxonomy;
use tempfile::tempdir;

#[test]
fn test_write_report_artifacts() -> anyhow::Result<()> {
    let corpus = tempdir()?;
    fs::write(corpus.path().join("a.txt"), "java y python")?;
    fs::write(corpus.path().join("b.txt"), "python")?;
    fs::write(corpus.path().join("broken.pdf"), b"not a pdf")?;

    let tax = Taxonomy::parse("Java: [java]\nPython: [python]\n").unwrap();
    let extensions = scanner::parse_extensions("pdf,txt");
    let documents = scanner::scan_folder(corpus.path(), &extensions)?;
    let report = pipeline::run(&documents, &tax, &ScanOptions::default())?;

    let out = tempdir()?;
    export::write_report(&report, out.path())?;

    let matrix = fs::read_to_string(out.path().join(export::MATRIX_FILE))?;
    let lines: Vec<&str> = matrix.lines().collect();
    assert_eq!(lines[0], "document,Java,Python,total");
    assert_eq!(lines.len(), 4); // 2 documents + header + TOTAL
    assert!(lines[3].starts_with("TOTAL,1,2,"));

    let failures = fs::read_to_string(out.path().join(export::FAILURES_FILE))?;
    assert!(failures.contains("broken.pdf"));
    assert!(failures.lines().count() == 2); // header + one failure

    let summary = fs::read_to_string(out.path().join(export::SUMMARY_FILE))?;
    let parsed: serde_json::Value = serde_json::from_str(&summary)?;
    assert_eq!(parsed["documents_processed"], 2);
    assert_eq!(parsed["documents_failed"], 1);
    assert_eq!(parsed["category_totals"][0]["category"], "Java");
    assert_eq!(parsed["category_totals"][0]["total"], 1);

    Ok(())
}

#[test]
fn test_csv_output_byte_identical_across_runs() -> anyhow::Result<()> {
    let corpus = tempdir()?;
    for i in 0..6 {
        fs::write(
            corpus.path().join(format!("doc{}.txt", i)),
            "java, python y java",
        )?;
    }

    let tax = Taxonomy::parse("Java: [java]\nPython: [python]\n").unwrap();
    let extensions = scanner::parse_extensions("txt");
    let documents = scanner::scan_folder(corpus.path(), &extensions)?;

    let out_a = tempdir()?;
    let out_b = tempdir()?;
    let report_a = pipeline::run(&documents, &tax, &ScanOptions::default())?;
    let report_b = pipeline::run(&documents, &tax, &ScanOptions { jobs: Some(2), verbose: false })?;
    export::write_report(&report_a, out_a.path())?;
    export::write_report(&report_b, out_b.path())?;

    let matrix_a = fs::read(out_a.path().join(export::MATRIX_FILE))?;
    let matrix_b = fs::read(out_b.path().join(export::MATRIX_FILE))?;
    assert_eq!(matrix_a, matrix_b);

    let failures_a = fs::read(out_a.path().join(export::FAILURES_FILE))?;
    let failures_b = fs::read(out_b.path().join(export::FAILURES_FILE))?;
    assert_eq!(failures_a, failures_b);

    Ok(())
}

#[test]
fn test_empty_corpus_still_writes_wellformed_files() -> anyhow::Result<()> {
    let tax = Taxonomy::parse("Java: [java]\n").unwrap();
    let report = pipeline::run(&[], &tax, &ScanOptions::default())?;

    let out = tempdir()?;
    export::write_report(&report, out.path())?;

    let matrix = fs::read_to_string(out.path().join(export::MATRIX_FILE))?;
    assert_eq!(matrix, "document,Java,total\nTOTAL,0,0\n");

    let failures = fs::read_to_string(out.path().join(export::FAILURES_FILE))?;
    assert_eq!(failures, "document,reason\n");

    Ok(())
}
