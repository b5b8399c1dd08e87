//! Adapters around the external checking engines.
//!
//! Each engine is a trait so invokers can be driven by fakes in tests. The
//! production implementations run the Python tools as child processes
//! (`python -m <module>`) on exactly one file and translate their output
//! into sink callbacks or result tuples.

pub mod flake8;
pub mod pycodestyle;
pub mod pyflakes;

pub use flake8::Flake8Engine;
pub use pycodestyle::PycodestyleEngine;
pub use pyflakes::PyflakesEngine;

use crate::error::LintError;
use crate::models::Violation;
use crate::reporter::{DiagnosticSink, StyleSink};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Tracing target for engine subprocesses.
const ENGINE_TARGET: &str = "pydevlint::engine";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// What the semantic engine itself observed for one file.
pub struct EngineStatus {
    /// Diagnostics emitted, before any filtering by the sink.
    pub emitted: usize,
    /// A syntax failure or unexpected error was emitted.
    pub fatal: bool,
}

/// Semantic (unused-name / syntax) checker.
pub trait SemanticEngine {
    fn check_path(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<EngineStatus, LintError>;
}

/// Style checker. Returns the number of raw errors it produced.
pub trait StyleEngine {
    fn check_file(&self, path: &Path, sink: &mut dyn StyleSink) -> Result<usize, LintError>;
}

/// Multi-plugin framework.
///
/// Contract: run every plugin against exactly one file, synchronously, with
/// the framework's own worker pool disabled, and return the raw results.
pub trait PluginEngine {
    fn run_checks(&self, path: &Path) -> Result<Vec<Violation>, LintError>;
}

/// Run `python -m <module> <args..> <path>` and capture its output.
pub(crate) fn run_module(
    engine: &'static str,
    python: &str,
    module: &str,
    args: &[String],
    path: &Path,
) -> Result<Output, LintError> {
    debug!(
        target: ENGINE_TARGET,
        engine,
        python,
        file = %path.display(),
        "running engine"
    );
    let output = Command::new(python)
        .arg("-m")
        .arg(module)
        .args(args)
        .arg(path)
        .output()
        .map_err(|source| LintError::EngineSpawn { engine, source })?;
    debug!(
        target: ENGINE_TARGET,
        engine,
        status = ?output.status.code(),
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "engine finished"
    );
    Ok(output)
}

/// Strip `"{path}:"` from the start of an output line.
pub(crate) fn strip_path<'a>(line: &'a str, path: &str) -> Option<&'a str> {
    line.strip_prefix(path)?.strip_prefix(':')
}

/// Split `"row:col: rest"` (col optional) into its parts.
pub(crate) fn split_location(rest: &str) -> Option<(usize, Option<usize>, &str)> {
    let (row, rest) = rest.split_once(':')?;
    let row = row.trim().parse().ok()?;
    if let Some((col, text)) = rest.split_once(':') {
        if let Ok(col) = col.trim().parse() {
            return Some((row, Some(col), text.strip_prefix(' ').unwrap_or(text)));
        }
    }
    Some((row, None, rest.strip_prefix(' ').unwrap_or(rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_path_and_split_location() {
        let line = "pkg/a.py:12:5: 'os' imported but unused";
        let rest = strip_path(line, "pkg/a.py").unwrap();
        assert_eq!(split_location(rest), Some((12, Some(5), "'os' imported but unused")));
        assert_eq!(strip_path(line, "pkg/b.py"), None);
    }

    #[test]
    fn test_split_location_without_column() {
        assert_eq!(
            split_location("3: unexpected EOF: while parsing"),
            Some((3, None, "unexpected EOF: while parsing"))
        );
        assert_eq!(split_location("x: nope"), None);
    }
}
