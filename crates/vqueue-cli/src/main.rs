//! vqueue CLI
//!
//! Command-line interface for the versioned queue engine

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vqueue")]
#[command(about = "vqueue - Versioned FIFO queue with historical queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute a command batch and print every query result
    Run(commands::run::RunArgs),
    /// Validate a command batch without executing it
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
