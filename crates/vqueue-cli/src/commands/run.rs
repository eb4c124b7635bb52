//! Run command
//!
//! Usage: vqueue run [--strategy <S>] [--input <FILE>] [--config <FILE>]
//!                   [--snapshot-dir <DIR>] [--json] [--log-profile <P>]

use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use vqueue_core::logging_facility::{self, Profile};
use vqueue_core::{ExError, StrategyKind, VqError};
use vqueue_engine::{
    apply_engine_command, EngineCommand, EngineCommandResult, EngineConfig, OutputFormat,
    WriterSink,
};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Reconstruction strategy: replay (alias: compute), memory or disk
    #[arg(short, long)]
    pub strategy: Option<StrategyKind>,

    /// Input file (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the disk strategy's table (default: a temporary directory)
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Print results as JSON objects instead of `[a, b]` lists
    #[arg(long)]
    pub json: bool,

    /// Log profile: development or production
    #[arg(long)]
    pub log_profile: Option<Profile>,
}

impl RunArgs {
    /// Configuration file (if any) with command-line flags applied on top
    fn resolve_config(&self) -> Result<EngineConfig, ExError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(dir) = &self.snapshot_dir {
            config.snapshot_dir = Some(dir.clone());
        }
        if let Some(profile) = self.log_profile {
            config.log_profile = profile;
        }
        if self.json {
            config.output = OutputFormat::Json;
        }
        Ok(config)
    }
}

/// Execute run command
pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve_config()?;
    logging_facility::init(config.log_profile);

    let batch = super::load_batch(args.input.as_deref())?;

    let stdout = io::stdout();
    let mut sink = WriterSink::new(stdout.lock(), config.output);
    let result = apply_engine_command(EngineCommand::Run { batch }, &config, &mut sink)
        .map_err(ExError::from)?;

    sink.into_inner().flush().map_err(|e| {
        ExError::from(VqError::StorageIo {
            op: "write_result".to_string(),
            message: e.to_string(),
        })
    })?;

    if let EngineCommandResult::Ran(outcome) = result {
        tracing::debug!(
            version = outcome.final_version,
            queries = outcome.results.len(),
            "Batch finished"
        );
    }

    Ok(())
}
