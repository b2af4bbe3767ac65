use clap::Parser;
use techscan::{cli, error, export, pipeline, scanner, taxonomy};
use cli::{Cli, Commands};
use error::Result;
use taxonomy::Taxonomy;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { folder, keywords, pattern, output, jobs } => {
            println!("🔍 techscan - tender technology scan\n");

            // 1. Taxonomy
            println!("[1/4] Loading keyword taxonomy...");
            let taxonomy = match keywords {
                Some(path) => Taxonomy::load(&path)?,
                None => Taxonomy::default_set(),
            };
            println!(
                "✔ {} categories, {} terms\n",
                taxonomy.len(),
                taxonomy.term_count()
            );

            // 2. Corpus discovery
            println!("[2/4] Scanning documents...");
            let extensions = scanner::parse_extensions(&pattern);
            let documents = scanner::scan_folder(&folder, &extensions)?;
            println!("✔ {} documents found\n", documents.len());

            if documents.is_empty() {
                println!("⚠ No matching documents in {}", folder.display());
            }

            // 3. Extract + match
            println!("[3/4] Extracting text and matching keywords...");
            let options = pipeline::ScanOptions { jobs, verbose: cli.verbose };
            let report = pipeline::run(&documents, &taxonomy, &options)?;
            println!(
                "✔ {} processed, {} failed\n",
                report.rows.len(),
                report.failures.len()
            );

            // 4. Report
            println!("[4/4] Writing report...");
            export::write_report(&report, &output)?;

            print_run_summary(&report);
        }

        Commands::Keywords { write } => {
            let taxonomy = Taxonomy::default_set();
            let yaml = taxonomy.to_yaml_string()?;

            match write {
                Some(path) => {
                    std::fs::write(&path, yaml)?;
                    println!("✔ Keyword file written: {}", path.display());
                    println!("  Edit it and pass it to scan with --keywords");
                }
                None => print!("{}", yaml),
            }
        }
    }

    Ok(())
}

fn print_run_summary(report: &techscan::aggregate::AggregateReport) {
    println!("\n✅ Scan complete");
    println!("📊 Documents processed: {}", report.rows.len());
    println!("❌ Documents failed: {}", report.failures.len());
    if report.suspect_count() > 0 {
        println!("⚠ Suspect extractions: {}", report.suspect_count());
    }

    let summary = export::summary::build_summary(report);
    if !summary.ranking.is_empty() {
        println!("\n🏆 Top technologies:");
        for (i, entry) in summary.ranking.iter().take(5).enumerate() {
            println!(
                "   {}. {} ({} documents)",
                i + 1,
                entry.variant,
                entry.documents
            );
        }
    }

    if !report.failures.is_empty() {
        println!("\nFailed documents:");
        for failure in &report.failures {
            println!("   {}: {}", failure.path, failure.reason);
        }
    }
}
