//! Check command
//!
//! Usage: vqueue check [--input <FILE>] [--json]

use clap::Args;
use std::path::PathBuf;

use vqueue_core::ExError;
use vqueue_engine::{apply_engine_command, EngineCommand, EngineCommandResult, EngineConfig, VecSink};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the summary as a JSON object
    #[arg(long)]
    pub json: bool,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let batch = super::load_batch(args.input.as_deref())?;

    let mut sink = VecSink::new();
    let result = apply_engine_command(
        EngineCommand::Check { batch },
        &EngineConfig::default(),
        &mut sink,
    )
    .map_err(ExError::from)?;

    if let EngineCommandResult::Checked(summary) = result {
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("✓ {} commands are valid", summary.commands);
            println!("  mutations: {}", summary.mutations);
            println!("  queries: {}", summary.queries);
        }
    }

    Ok(())
}
