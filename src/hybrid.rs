//! Hybrid build-file parser
//!
//! Combines marker detection, syntax resolution and a fixed syntax-to-parser
//! registry into one parser that routes each build file to the delegate
//! responsible for its syntax, behind the same [`BuildFileParser`] interface
//! the delegates implement.

use crate::marker;
use crate::parser::{BuildFileParser, RuleMap};
use crate::syntax::Syntax;
use crate::{Error, Result};
use std::path::Path;
use std::sync::atomic::AtomicU64;

/// Fixed table of delegate parsers, one per registered syntax.
///
/// Entries keep first-registration order, which is also the order lifecycle
/// fan-outs visit them in. Registering a syntax twice replaces the earlier
/// delegate in place.
#[derive(Default)]
pub struct ParserRegistry {
    entries: Vec<(Syntax, Box<dyn BuildFileParser>)>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the delegate parser for `syntax`
    pub fn register(&mut self, syntax: Syntax, parser: impl BuildFileParser + 'static) {
        match self.entries.iter_mut().find(|(s, _)| *s == syntax) {
            Some(entry) => entry.1 = Box::new(parser),
            None => self.entries.push((syntax, Box::new(parser))),
        }
    }

    /// Look up the delegate registered for `syntax`
    pub fn get(&self, syntax: Syntax) -> Option<&dyn BuildFileParser> {
        self.entries
            .iter()
            .find(|(s, _)| *s == syntax)
            .map(|(_, p)| p.as_ref())
    }

    /// Whether a delegate is registered for `syntax`
    pub fn contains(&self, syntax: Syntax) -> bool {
        self.entries.iter().any(|(s, _)| *s == syntax)
    }

    /// Registered syntaxes, in registration order
    pub fn syntaxes(&self) -> Vec<Syntax> {
        self.entries.iter().map(|(s, _)| *s).collect()
    }

    /// Number of registered delegates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no delegate has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (Syntax, &dyn BuildFileParser)> + '_ {
        self.entries.iter().map(|(s, p)| (*s, p.as_ref()))
    }
}

/// Build-file parser that routes each file to the delegate for its syntax.
///
/// The default syntax applies to files without a marker line. A marker
/// requesting a known syntax overrides it; a marker requesting an unknown
/// name is an error, never a silent fall back to the default. Selection is
/// recomputed from the file's first line on every data call - nothing is
/// cached, so a file whose marker changes between calls is re-routed.
///
/// `close` and `report_profile` instead fan out to every registered
/// delegate in registration order, attempting all of them and aggregating
/// any failures into [`Error::Lifecycle`].
///
/// The parser holds no mutable state after construction; concurrent calls
/// are as safe as the delegates themselves make them.
pub struct HybridParser {
    registry: ParserRegistry,
    default_syntax: Syntax,
}

impl HybridParser {
    /// Create a hybrid parser over `registry`, using `default_syntax` for
    /// build files without a marker line.
    ///
    /// # Panics
    ///
    /// Panics if no delegate is registered for `default_syntax`. That is a
    /// construction-time programming error, checked eagerly rather than
    /// surfacing on some later parse.
    pub fn new(registry: ParserRegistry, default_syntax: Syntax) -> Self {
        assert!(
            registry.contains(default_syntax),
            "default syntax {default_syntax} is not mapped to any parser"
        );
        Self {
            registry,
            default_syntax,
        }
    }

    /// The syntax used for build files without a marker line
    pub fn default_syntax(&self) -> Syntax {
        self.default_syntax
    }

    /// Registered syntaxes, in registration order
    pub fn syntaxes(&self) -> Vec<Syntax> {
        self.registry.syntaxes()
    }

    /// Decide which syntax handles `build_file`.
    ///
    /// A marker requesting a known syntax wins over the default; no marker
    /// means the default; a marker requesting an unknown name fails with
    /// [`Error::UnrecognizedSyntax`] carrying the path and the requested name
    /// verbatim.
    pub fn select_syntax(&self, build_file: &Path) -> Result<Syntax> {
        let syntax = match marker::requested_syntax_name(build_file)? {
            None => self.default_syntax,
            Some(name) => Syntax::from_marker_name(&name).ok_or_else(|| {
                Error::UnrecognizedSyntax {
                    build_file: build_file.to_path_buf(),
                    name,
                }
            })?,
        };
        tracing::debug!("selected {} for {}", syntax, build_file.display());
        Ok(syntax)
    }

    /// The delegate parser that should handle `build_file`.
    ///
    /// # Panics
    ///
    /// Panics if the selected syntax has no registered delegate (possible
    /// when a marker requests a known syntax the registry was never given) -
    /// a configuration defect, not a per-call error.
    fn parser_for(&self, build_file: &Path) -> Result<&dyn BuildFileParser> {
        let syntax = self.select_syntax(build_file)?;
        match self.registry.get(syntax) {
            Some(parser) => Ok(parser),
            None => panic!("{syntax} is not mapped to any parser"),
        }
    }

    /// Invoke `op` on every registered delegate, in registration order,
    /// collecting failures instead of stopping at the first one.
    fn fan_out(
        &self,
        operation: &'static str,
        op: impl Fn(&dyn BuildFileParser) -> Result<()>,
    ) -> Result<()> {
        let mut failures = Vec::new();
        for (syntax, parser) in self.registry.iter() {
            if let Err(error) = op(parser) {
                tracing::warn!("{} failed for {} parser: {}", operation, syntax, error);
                failures.push((syntax, error));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Lifecycle {
                operation,
                attempted: self.registry.len(),
                failures,
            })
        }
    }
}

impl BuildFileParser for HybridParser {
    fn get_all(&self, build_file: &Path, processed_bytes: &AtomicU64) -> Result<Vec<RuleMap>> {
        self.parser_for(build_file)?.get_all(build_file, processed_bytes)
    }

    fn get_all_rules_and_meta_rules(
        &self,
        build_file: &Path,
        processed_bytes: &AtomicU64,
    ) -> Result<Vec<RuleMap>> {
        self.parser_for(build_file)?
            .get_all_rules_and_meta_rules(build_file, processed_bytes)
    }

    fn report_profile(&self) -> Result<()> {
        self.fan_out("report_profile", |parser| parser.report_profile())
    }

    fn close(&self) -> Result<()> {
        self.fan_out("close", |parser| parser.close())
    }
}
