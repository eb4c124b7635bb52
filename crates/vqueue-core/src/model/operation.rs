//! Operation types and line parsing
//!
//! One input line maps to exactly one [`Operation`]. The grammar is a kind
//! token (`e`, `d`, `p`, case-insensitive) followed by at most one argument.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VqError};
use crate::model::Version;

/// One requested action against the versioned queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Append a value to the back of the queue
    Enqueue { value: String },

    /// Remove the front element
    Dequeue,

    /// Read the contents right after `version` mutations
    Query { version: Version },
}

/// The mutating subset of [`Operation`]
///
/// Strategies only ever see mutations through `apply`; queries take a
/// separate path, so the type rules out a query reaching the mutation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Enqueue(String),
    Dequeue,
}

impl Operation {
    /// Parse one command line
    ///
    /// `line_no` is 1-based and only used for error context.
    ///
    /// # Errors
    ///
    /// * `MalformedOperation` - Wrong argument count, empty line, or a
    ///   version that is not a non-negative integer
    /// * `UnknownOperationKind` - Leading token is not `e`, `d` or `p`
    ///
    /// # Example
    ///
    /// ```
    /// use vqueue_core::Operation;
    ///
    /// let op = Operation::parse("E 42", 1).unwrap();
    /// assert_eq!(op, Operation::Enqueue { value: "42".to_string() });
    /// ```
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let malformed = |reason: &str| VqError::MalformedOperation {
            line: line_no,
            text: line.to_string(),
            reason: reason.to_string(),
        };

        let mut tokens = line.split_whitespace();
        let kind = tokens.next().ok_or_else(|| malformed("empty line"))?;
        let arg = tokens.next();
        if tokens.next().is_some() {
            return Err(malformed("too many arguments"));
        }

        match kind.to_ascii_lowercase().as_str() {
            "e" => {
                let value = arg.ok_or_else(|| malformed("enqueue requires a value"))?;
                Ok(Operation::Enqueue {
                    value: value.to_string(),
                })
            }
            "d" => match arg {
                None => Ok(Operation::Dequeue),
                Some(_) => Err(malformed("dequeue takes no argument")),
            },
            "p" => {
                let raw = arg.ok_or_else(|| malformed("query requires a version"))?;
                let version = raw.parse::<Version>().map_err(|_| {
                    malformed("query version must be a non-negative integer")
                })?;
                Ok(Operation::Query { version })
            }
            _ => Err(VqError::UnknownOperationKind {
                line: line_no,
                kind: kind.to_string(),
            }),
        }
    }

    /// Whether applying this operation advances the version counter
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::Query { .. })
    }

    /// The mutation this operation requests, if it is one
    pub fn as_mutation(&self) -> Option<Mutation> {
        match self {
            Operation::Enqueue { value } => Some(Mutation::Enqueue(value.clone())),
            Operation::Dequeue => Some(Mutation::Dequeue),
            Operation::Query { .. } => None,
        }
    }

    /// Stable short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Enqueue { .. } => "enqueue",
            Operation::Dequeue => "dequeue",
            Operation::Query { .. } => "query",
        }
    }
}

/// Parse and validate a whole batch before anything is applied
///
/// Lines are numbered from `first_line_no`, which lets callers account for a
/// header line that was consumed elsewhere.
///
/// # Errors
///
/// Returns the first parse error in input order; no later line is examined.
pub fn parse_batch<S: AsRef<str>>(lines: &[S], first_line_no: usize) -> Result<Vec<Operation>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| Operation::parse(line.as_ref(), first_line_no + i))
        .collect()
}
