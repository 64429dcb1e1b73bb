//! Build-definition syntaxes
//!
//! The closed set of description syntaxes a project's build files may be
//! written in, plus the resolver that maps a requested name (from a marker
//! line, configuration, or the command line) to a syntax value.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One supported build-definition syntax.
///
/// Each syntax is backed by its own delegate parser. The canonical name
/// (`PYTHON_DSL`, `SKYLARK`) is what marker lines and configuration use to
/// request it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Syntax {
    /// Build files evaluated as the Python-based rule DSL
    PythonDsl,
    /// Build files evaluated as the restricted Skylark dialect
    Skylark,
}

impl Syntax {
    /// Get the canonical name, as written after the syntax marker
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::PythonDsl => "PYTHON_DSL",
            Syntax::Skylark => "SKYLARK",
        }
    }

    /// Get all supported syntaxes
    pub fn all() -> &'static [Syntax] {
        &[Syntax::PythonDsl, Syntax::Skylark]
    }

    /// Resolve a name requested after the syntax marker in the first line of
    /// a build file.
    ///
    /// Matching is exact and case-sensitive against the canonical names: no
    /// trimming, no case folding, no partial matches.
    pub fn from_marker_name(name: &str) -> Option<Syntax> {
        Syntax::all().iter().copied().find(|syntax| syntax.as_str() == name)
    }
}

impl FromStr for Syntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Syntax::from_marker_name(s).ok_or_else(|| Error::UnknownSyntax(s.to_string()))
    }
}

impl std::fmt::Display for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
