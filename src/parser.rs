//! Build-file parser capability
//!
//! Defines the interface every syntax-specific parser backend implements.
//! Backends are opaque to the dispatch layer: it forwards data calls to the
//! one selected for a file and fans lifecycle calls out to all of them, but
//! never looks inside the rules they produce.

use crate::Result;
use std::path::Path;
use std::sync::atomic::AtomicU64;

/// A single build rule (or meta rule) as a loosely typed record.
pub type RuleMap = serde_json::Map<String, serde_json::Value>;

/// Capability set shared by every syntax-specific build-file parser.
///
/// Implementations own their thread-safety: the dispatch layer adds no
/// locking of its own, so a parser that is called concurrently must cope via
/// interior mutability. Blocking and cancellation behavior is likewise the
/// parser's: [`Error::Interrupted`](crate::Error::Interrupted) passes through
/// the dispatch layer unmodified.
pub trait BuildFileParser: Send + Sync {
    /// Collect every rule declared in `build_file`, in declaration order.
    ///
    /// `processed_bytes` is a shared counter the parser adds the bytes it
    /// consumed to, for progress accounting.
    fn get_all(&self, build_file: &Path, processed_bytes: &AtomicU64) -> Result<Vec<RuleMap>>;

    /// Like [`get_all`](BuildFileParser::get_all), additionally including the
    /// meta rules describing the parse itself (included files, configuration
    /// values and environment the build file read).
    fn get_all_rules_and_meta_rules(
        &self,
        build_file: &Path,
        processed_bytes: &AtomicU64,
    ) -> Result<Vec<RuleMap>>;

    /// Emit whatever profiling information the parser collected so far.
    fn report_profile(&self) -> Result<()>;

    /// Release the resources held by the parser.
    fn close(&self) -> Result<()>;
}
