pub mod check;
pub mod run;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use vqueue_core::{ExError, VqError};
use vqueue_engine::{read_batch, Batch};

/// Read a counted batch from `path`, or from stdin when no path is given
pub(crate) fn load_batch(path: Option<&Path>) -> Result<Batch, ExError> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| VqError::StorageIo {
                op: "open_input".to_string(),
                message: format!("{}: {}", path.display(), e),
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    Ok(read_batch(reader)?)
}
