//! vqueue Engine - Orchestration layer
//!
//! Provides the batch engine that validates a whole command batch, drives
//! it through the selected strategy, and hands query results to a sink,
//! plus the input reader and configuration used by front ends.

pub mod commands;
pub mod config;
pub mod input;
pub mod sink;

pub use commands::batch::{BatchOutcome, Engine, EngineState, Termination};
pub use commands::engine_command::{
    apply_engine_command, BatchSummary, EngineCommand, EngineCommandResult,
};
pub use config::EngineConfig;
pub use input::{read_batch, Batch};
pub use sink::{OutputFormat, ResultSink, VecSink, WriterSink};
