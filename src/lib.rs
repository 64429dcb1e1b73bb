//! # Polybuild - Syntax dispatch for multi-syntax build definitions
//!
//! A project may contain build-definition files written in more than one
//! supported description syntax, each handled by its own parser backend.
//!
//! Polybuild provides:
//! - A closed [`Syntax`] enumeration with exact, case-sensitive name resolution
//! - First-line marker detection (`# BUILD FILE SYNTAX: <NAME>`) that overrides
//!   the configured default syntax per file
//! - A hybrid parser that routes every data call to the delegate selected for
//!   that file, behind the same [`BuildFileParser`] interface the delegates
//!   implement
//! - Lifecycle fan-out: `close`/`report_profile` reach every registered
//!   delegate, not just the ones previous calls selected
//!
//! Polybuild never parses build definitions itself - the delegates do. It
//! holds no mutable state after construction and adds no locking, caching,
//! or retries of its own.

pub mod config;
pub mod hybrid;
pub mod marker;
pub mod parser;
pub mod syntax;

// Re-exports for convenient access
pub use hybrid::{HybridParser, ParserRegistry};
pub use parser::{BuildFileParser, RuleMap};
pub use syntax::Syntax;

use std::path::PathBuf;

/// Result type alias for polybuild operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for polybuild operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A build file's marker line requested a name that resolves to no known
    /// syntax. The configured default is deliberately not used as a fallback
    /// here: a newly introduced syntax need not be compatible with it.
    #[error("Unrecognized syntax [{name}] requested for build file [{}]", .build_file.display())]
    UnrecognizedSyntax { build_file: PathBuf, name: String },

    /// A textual syntax name from config or the command line matched no
    /// known syntax.
    #[error("Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delegate-originated parse failure, passed through unmodified.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Cooperative cancellation observed by a delegate parser (or by the
    /// file-read step), passed through unmodified.
    #[error("Parser interrupted")]
    Interrupted,

    /// One or more delegates failed during `close`/`report_profile` fan-out.
    /// Every registered delegate is still attempted before this is returned.
    #[error("{operation} failed for {} of {attempted} registered parsers", .failures.len())]
    Lifecycle {
        operation: &'static str,
        attempted: usize,
        failures: Vec<(Syntax, Error)>,
    },
}
