use clap::Parser;

use ledgerlens::cli::{self, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { file, raw, json } => cli::analyze::run(&file, raw, json),
        Commands::Demo { json } => cli::demo::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
