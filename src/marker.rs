//! Syntax marker detection
//!
//! A build file may open with a parser directive naming the syntax it is
//! written in:
//!
//! ```text
//! # BUILD FILE SYNTAX: SKYLARK
//! ```
//!
//! Only the literal first line is consulted, and only an exact prefix match
//! counts as a marker. The requested name is whatever follows the prefix, to
//! end-of-line, verbatim.

use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Prefix a build file's first line must start with to request a syntax.
pub const SYNTAX_MARKER_START: &str = "# BUILD FILE SYNTAX: ";

/// Extract the syntax name requested by `build_file`'s marker line, if any.
///
/// Returns `Ok(None)` when the file is empty or its first line does not start
/// with [`SYNTAX_MARKER_START`]. Read failures (missing file, permission
/// denied, a first line that is not UTF-8) propagate unchanged as
/// [`Error::Io`](crate::Error::Io).
pub fn requested_syntax_name(build_file: &Path) -> Result<Option<String>> {
    let first_line = read_first_line(build_file)?;
    Ok(first_line.and_then(|line| line.strip_prefix(SYNTAX_MARKER_START).map(str::to_string)))
}

/// Read only the first line of `path`, without its line terminator. An empty
/// file has no first line.
fn read_first_line(path: &Path) -> std::io::Result<Option<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().next().transpose()
}
