//! File source — reads a plain-text Zeek log from disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{read_log, FeedError, LogInput};

/// Open and fully read the log at `path`.
pub fn open(path: &Path) -> Result<LogInput, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_log(BufReader::new(file), path.display().to_string())
}
