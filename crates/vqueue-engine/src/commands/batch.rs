//! Batch engine
//!
//! ## Pipeline (in order):
//! 1. Refuse to run if the engine already terminated
//! 2. Parse and validate every line (no operation applied on failure)
//! 3. Execute operations strictly in order through the strategy
//! 4. Deliver query results to the sink (only after every step succeeded)
//! 5. Transition `Accepting → Terminated`, exactly once, success or failure

use std::time::Instant;

use vqueue_core::{
    apply, log_op_end, log_op_error, log_op_start, parse_batch, ExErrorKind, Operation,
    QueryResult, Result, StepOutcome, Strategy, StrategyKind, Timeline, Version, VqError,
};
use vqueue_core_types::RunId;

use crate::input::Batch;
use crate::sink::ResultSink;

/// How a terminated engine ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Completed,
    Failed(ExErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Accepting,
    Terminated(Termination),
}

/// Everything a successful batch produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Query results in input order
    pub results: Vec<QueryResult>,
    /// Version counter after the last mutation
    pub final_version: Version,
    /// Number of mutations applied
    pub mutations: usize,
}

/// Single-use engine owning the timeline and the active strategy
///
/// An engine processes exactly one batch. Afterwards it stays inspectable
/// (`state`, `timeline`) but refuses further work.
pub struct Engine {
    run_id: RunId,
    timeline: Timeline,
    strategy: Box<dyn Strategy>,
    state: EngineState,
}

impl Engine {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self::with_run_id(strategy, RunId::new())
    }

    /// Engine whose log events carry the given run id
    pub fn with_run_id(strategy: Box<dyn Strategy>, run_id: RunId) -> Self {
        Self {
            run_id,
            timeline: Timeline::new(),
            strategy,
            state: EngineState::Accepting,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn version(&self) -> Version {
        self.timeline.version()
    }

    /// Run command lines numbered from 1
    ///
    /// # Errors
    ///
    /// The first validation or execution error; see [`Engine::run_batch_with_sink`].
    pub fn run<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<BatchOutcome> {
        self.execute(lines, 1, None)
    }

    /// Run a batch read by [`crate::input::read_batch`]
    ///
    /// # Errors
    ///
    /// The first validation or execution error; see [`Engine::run_batch_with_sink`].
    pub fn run_batch(&mut self, batch: &Batch) -> Result<BatchOutcome> {
        self.execute(&batch.lines, batch.first_line_no, None)
    }

    /// Run command lines numbered from 1 and deliver results to `sink`
    ///
    /// # Errors
    ///
    /// See [`Engine::run_batch_with_sink`].
    pub fn run_with_sink<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        sink: &mut dyn ResultSink,
    ) -> Result<BatchOutcome> {
        self.execute(lines, 1, Some(sink))
    }

    /// Run a batch and deliver its results to `sink`
    ///
    /// The sink sees nothing unless every operation succeeded.
    ///
    /// # Errors
    ///
    /// * `EngineTerminated` - This engine already ran a batch
    /// * `MalformedOperation` / `UnknownOperationKind` - Validation failed; nothing applied
    /// * `EmptyQueueUnderflow` - A dequeue hit an empty queue
    /// * `VersionNotFound` - A query named a version never reached
    /// * `StorageIo` / `SnapshotCorrupt` / `Serialization` - Storage or sink failure
    pub fn run_batch_with_sink(
        &mut self,
        batch: &Batch,
        sink: &mut dyn ResultSink,
    ) -> Result<BatchOutcome> {
        self.execute(&batch.lines, batch.first_line_no, Some(sink))
    }

    fn execute<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        first_line_no: usize,
        sink: Option<&mut dyn ResultSink>,
    ) -> Result<BatchOutcome> {
        if self.state != EngineState::Accepting {
            return Err(VqError::EngineTerminated);
        }

        let start = Instant::now();
        log_op_start!(
            "run_batch",
            run_id = %self.run_id,
            strategy = %self.strategy.kind(),
            ops_len = lines.len()
        );

        let result = self.execute_accepting(lines, first_line_no, sink);
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(outcome) => {
                self.state = EngineState::Terminated(Termination::Completed);
                log_op_end!(
                    "run_batch",
                    duration_ms = duration_ms,
                    run_id = %self.run_id,
                    version = outcome.final_version,
                    queries = outcome.results.len()
                );
            }
            Err(err) => {
                self.state = EngineState::Terminated(Termination::Failed(err.kind()));
                log_op_error!(
                    "run_batch",
                    err.clone(),
                    duration_ms = duration_ms,
                    run_id = %self.run_id,
                    version = self.timeline.version()
                );
            }
        }

        result
    }

    fn execute_accepting<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        first_line_no: usize,
        sink: Option<&mut dyn ResultSink>,
    ) -> Result<BatchOutcome> {
        let operations: Vec<Operation> = parse_batch(lines, first_line_no)?;

        let mut results = Vec::new();
        for op in &operations {
            let outcome = apply(&mut self.timeline, self.strategy.as_mut(), op)?;
            if let StepOutcome::Queried(result) = outcome {
                results.push(result);
            }
        }

        if let Some(sink) = sink {
            sink.accept_batch(&results)?;
        }

        Ok(BatchOutcome {
            results,
            final_version: self.timeline.version(),
            mutations: operations.iter().filter(|op| op.is_mutation()).count(),
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("run_id", &self.run_id)
            .field("strategy", &self.strategy.kind())
            .field("version", &self.timeline.version())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqueue_core::{MemorySnapshot, Replay};

    #[test]
    fn test_engine_starts_accepting_at_version_zero() {
        let engine = Engine::new(Box::new(Replay::new()));
        assert_eq!(engine.state(), EngineState::Accepting);
        assert_eq!(engine.version(), 0);
        assert_eq!(engine.strategy_kind(), StrategyKind::Replay);
    }

    #[test]
    fn test_successful_run_terminates_completed() {
        let mut engine = Engine::new(Box::new(MemorySnapshot::new()));
        let outcome = engine.run(&["e 1", "p 1"]).unwrap();

        assert_eq!(outcome.mutations, 1);
        assert_eq!(outcome.final_version, 1);
        assert_eq!(
            engine.state(),
            EngineState::Terminated(Termination::Completed)
        );
    }

    #[test]
    fn test_second_run_is_rejected() {
        let mut engine = Engine::new(Box::new(Replay::new()));
        engine.run(&["e 1"]).unwrap();

        let err = engine.run(&["e 2"]).unwrap_err();
        assert_eq!(err, VqError::EngineTerminated);
        assert_eq!(engine.version(), 1);
    }

    #[test]
    fn test_failed_run_records_kind() {
        let mut engine = Engine::new(Box::new(Replay::new()));
        engine.run(&["d"]).unwrap_err();

        assert_eq!(
            engine.state(),
            EngineState::Terminated(Termination::Failed(ExErrorKind::EmptyQueueUnderflow))
        );
    }
}
