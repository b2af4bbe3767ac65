use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "techscan")]
#[command(about = "Extract IT technology mentions from tender specification documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Per-document extraction detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a folder of documents and build the keyword report
    Scan {
        /// Folder containing the documents to analyze
        #[arg(required = true)]
        folder: PathBuf,

        /// Keyword taxonomy YAML (built-in set when omitted)
        #[arg(short, long)]
        keywords: Option<PathBuf>,

        /// Comma-separated file extensions to scan
        #[arg(short, long, default_value = crate::scanner::DEFAULT_EXTENSIONS)]
        pattern: String,

        /// Output directory for the report files
        #[arg(short, long, default_value = "tech_analysis")]
        output: PathBuf,

        /// Worker threads (default: one per CPU core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Show the built-in keyword taxonomy, or write it as a starter file
    Keywords {
        /// Write the built-in taxonomy as YAML to this path
        #[arg(long)]
        write: Option<PathBuf>,
    },
}
