pub mod analyze;
pub mod demo;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ledgerlens", about = "Forensic analysis for small-business financial records.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a JSON case file: risk-score transactions, roll up monthly
    /// stats, and run the cross-record pattern scans.
    Analyze {
        /// Path to the case file
        file: String,
        /// Treat the file as raw data-entry rows and normalize them first
        #[arg(long)]
        raw: bool,
        /// Emit one combined JSON document instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Run the bundled sample case file through the same pipeline.
    Demo {
        /// Emit one combined JSON document instead of tables
        #[arg(long)]
        json: bool,
    },
}
