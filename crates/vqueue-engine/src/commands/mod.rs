//! Command orchestration layer.
//!
//! Provides the batch engine and the high-level commands front ends call.

pub mod batch;
pub mod engine_command;
