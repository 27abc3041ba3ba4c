//! Stdin source — reads a Zeek log piped into the process.

use crate::{read_log, FeedError, LogInput};

pub const ORIGIN: &str = "<stdin>";

/// Read the whole of standard input.
pub fn read() -> Result<LogInput, FeedError> {
    read_log(std::io::stdin().lock(), ORIGIN)
}
