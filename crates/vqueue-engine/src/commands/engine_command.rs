//! Front-end commands executed against a configuration.

use serde::Serialize;
use vqueue_core::{log_op_end, log_op_error, log_op_start, parse_batch, Operation, Result};

use crate::commands::batch::{BatchOutcome, Engine};
use crate::config::EngineConfig;
use crate::input::Batch;
use crate::sink::ResultSink;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Execute a batch with the configured strategy.
    Run { batch: Batch },
    /// Validate a batch without executing it.
    Check { batch: Batch },
}

/// Operation counts of a validated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub commands: usize,
    pub mutations: usize,
    pub queries: usize,
}

impl BatchSummary {
    fn from_operations(ops: &[Operation]) -> Self {
        let mutations = ops.iter().filter(|op| op.is_mutation()).count();
        Self {
            commands: ops.len(),
            mutations,
            queries: ops.len() - mutations,
        }
    }
}

#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Ran(BatchOutcome),
    Checked(BatchSummary),
}

/// Apply a command using a fresh engine built from `config`.
///
/// Query results of `Run` go to `sink` once the batch has succeeded.
///
/// # Errors
///
/// Any error from strategy construction, validation or execution.
pub fn apply_engine_command(
    cmd: EngineCommand,
    config: &EngineConfig,
    sink: &mut dyn ResultSink,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Run { batch } => {
            let mut engine = Engine::new(config.build_strategy()?);
            let outcome = engine.run_batch_with_sink(&batch, sink)?;
            Ok(EngineCommandResult::Ran(outcome))
        }
        EngineCommand::Check { batch } => {
            let start = std::time::Instant::now();
            log_op_start!("check_batch", ops_len = batch.len());
            match parse_batch(&batch.lines, batch.first_line_no) {
                Ok(ops) => {
                    let summary = BatchSummary::from_operations(&ops);
                    log_op_end!(
                        "check_batch",
                        duration_ms = start.elapsed().as_millis() as u64,
                        mutations = summary.mutations,
                        queries = summary.queries
                    );
                    Ok(EngineCommandResult::Checked(summary))
                }
                Err(err) => {
                    log_op_error!(
                        "check_batch",
                        err.clone(),
                        duration_ms = start.elapsed().as_millis() as u64
                    );
                    Err(err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecSink;
    use vqueue_core::VqError;

    fn batch(lines: &[&str]) -> Batch {
        Batch::from_lines(lines.iter().copied())
    }

    #[test]
    fn test_run_delivers_results_to_sink() {
        let mut sink = VecSink::new();
        let result = apply_engine_command(
            EngineCommand::Run {
                batch: batch(&["e 1", "e 2", "p 2"]),
            },
            &EngineConfig::default(),
            &mut sink,
        )
        .unwrap();

        let EngineCommandResult::Ran(outcome) = result else {
            panic!("expected Ran");
        };
        assert_eq!(outcome.final_version, 2);
        assert_eq!(sink.results, outcome.results);
        assert_eq!(sink.results[0].elements, vec!["1", "2"]);
    }

    #[test]
    fn test_check_counts_without_executing() {
        // GIVEN a batch whose dequeue would underflow if executed
        let cmd = EngineCommand::Check {
            batch: batch(&["d", "e 1", "p 7"]),
        };

        // WHEN checked
        let mut sink = VecSink::new();
        let result = apply_engine_command(cmd, &EngineConfig::default(), &mut sink).unwrap();

        // THEN only the grammar is validated
        let EngineCommandResult::Checked(summary) = result else {
            panic!("expected Checked");
        };
        assert_eq!(
            summary,
            BatchSummary {
                commands: 3,
                mutations: 2,
                queries: 1
            }
        );
        assert!(sink.results.is_empty());
    }

    #[test]
    fn test_check_reports_malformed_line() {
        let mut sink = VecSink::new();
        let err = apply_engine_command(
            EngineCommand::Check {
                batch: batch(&["e 1", "q 1"]),
            },
            &EngineConfig::default(),
            &mut sink,
        )
        .unwrap_err();

        assert!(matches!(err, VqError::UnknownOperationKind { line: 2, .. }));
    }
}
