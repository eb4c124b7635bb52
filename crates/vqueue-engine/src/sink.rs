//! Result sinks
//!
//! The engine hands the query results of a batch to a [`ResultSink`] in one
//! `accept_batch` call, once the whole batch has succeeded.

use std::io::Write;

use serde::Deserialize;
use vqueue_core::{QueryResult, Result, VqError};

pub trait ResultSink {
    /// Accept one query result
    ///
    /// # Errors
    ///
    /// Returns `StorageIo` if the result cannot be delivered.
    fn accept(&mut self, result: &QueryResult) -> Result<()>;

    /// Accept every result of a batch, in order
    ///
    /// # Errors
    ///
    /// Returns the first delivery error. The default forwards to `accept`
    /// one result at a time, so earlier results may already be delivered.
    fn accept_batch(&mut self, results: &[QueryResult]) -> Result<()> {
        for result in results {
            self.accept(result)?;
        }
        Ok(())
    }
}

/// Collects results in memory
#[derive(Debug, Default)]
pub struct VecSink {
    pub results: Vec<QueryResult>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for VecSink {
    fn accept(&mut self, result: &QueryResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

/// Text form of a result line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[a, b, c]`
    #[default]
    List,
    /// `{"version":2,"elements":["a","b"]}`
    Json,
}

/// Render one result in the given format
pub fn render(result: &QueryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::List => Ok(format!("[{}]", result.elements.join(", "))),
        OutputFormat::Json => serde_json::to_string(result).map_err(|e| VqError::Serialization {
            message: e.to_string(),
        }),
    }
}

/// Writes one rendered line per result
///
/// A batch is rendered into one buffer and handed to the writer with a
/// single `write_all`, so a rendering failure writes nothing and a writer
/// failure never happens between two lines.
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn write_error(err: std::io::Error) -> VqError {
    VqError::StorageIo {
        op: "write_result".to_string(),
        message: err.to_string(),
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn accept(&mut self, result: &QueryResult) -> Result<()> {
        self.accept_batch(std::slice::from_ref(result))
    }

    fn accept_batch(&mut self, results: &[QueryResult]) -> Result<()> {
        let mut buffer = String::new();
        for result in results {
            buffer.push_str(&render(result, self.format)?);
            buffer.push('\n');
        }
        self.writer
            .write_all(buffer.as_bytes())
            .map_err(write_error)
    }
}
