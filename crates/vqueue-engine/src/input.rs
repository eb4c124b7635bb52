//! Batch input reader
//!
//! Input is a header line holding the number of commands, followed by that
//! many command lines. Lines after the announced count are ignored.

use std::io::BufRead;

use vqueue_core::{Result, VqError};

/// Raw command lines of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub lines: Vec<String>,
    /// Input line number of `lines[0]`, for error context
    pub first_line_no: usize,
}

impl Batch {
    /// Batch built directly from command lines, numbered from 1
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            first_line_no: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn read_error(err: std::io::Error) -> VqError {
    VqError::StorageIo {
        op: "read_input".to_string(),
        message: err.to_string(),
    }
}

/// Read a counted batch from `reader`
///
/// # Errors
///
/// * `MalformedOperation` (line 1) - Header missing or not a non-negative integer
/// * `MalformedOperation` - Input ends before the announced number of commands
/// * `StorageIo` - The reader failed
pub fn read_batch<R: BufRead>(reader: R) -> Result<Batch> {
    let mut lines = reader.lines();

    let header = lines.next().transpose().map_err(read_error)?.unwrap_or_default();
    let count: usize = header
        .trim()
        .parse()
        .map_err(|_| VqError::MalformedOperation {
            line: 1,
            text: header.clone(),
            reason: "first line must be the number of commands".to_string(),
        })?;

    let mut commands = Vec::with_capacity(count.min(1024));
    for line in lines.take(count) {
        commands.push(line.map_err(read_error)?);
    }

    if commands.len() < count {
        return Err(VqError::MalformedOperation {
            line: commands.len() + 2,
            text: String::new(),
            reason: format!(
                "expected {} commands but input ended after {}",
                count,
                commands.len()
            ),
        });
    }

    Ok(Batch {
        lines: commands,
        first_line_no: 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_counted_batch() {
        let batch = read_batch(Cursor::new("3\ne 1\nd\np 0\n")).unwrap();
        assert_eq!(batch.lines, vec!["e 1", "d", "p 0"]);
        assert_eq!(batch.first_line_no, 2);
    }

    #[test]
    fn test_lines_beyond_count_are_ignored() {
        let batch = read_batch(Cursor::new("1\ne 1\ne 2\n")).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_crlf_input() {
        let batch = read_batch(Cursor::new("2\r\ne 1\r\np 1\r\n")).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.lines[0].trim_end(), "e 1");
    }

    #[test]
    fn test_zero_commands() {
        let batch = read_batch(Cursor::new("0\n")).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_bad_header() {
        let err = read_batch(Cursor::new("three\ne 1\n")).unwrap_err();
        assert!(matches!(err, VqError::MalformedOperation { line: 1, .. }));
    }

    #[test]
    fn test_empty_input_is_bad_header() {
        let err = read_batch(Cursor::new("")).unwrap_err();
        assert!(matches!(err, VqError::MalformedOperation { line: 1, .. }));
    }

    #[test]
    fn test_truncated_input() {
        let err = read_batch(Cursor::new("3\ne 1\n")).unwrap_err();
        assert!(matches!(err, VqError::MalformedOperation { line: 3, .. }));
    }
}
