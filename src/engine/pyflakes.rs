//! Semantic engine adapter: `python -m pyflakes <file>`.
//!
//! Findings arrive on stdout as `path:line:col: message` (1-based column);
//! the message is classified into a `FlakeKind` with its arguments.
//! Syntax errors and unexpected errors arrive on stderr:
//!
//! ```text
//! path:line:offset: message      path:line: message      path: message
//! <source line>                  <source line>
//! <caret line>
//! ```

use super::{run_module, split_location, strip_path, EngineStatus, SemanticEngine};
use crate::codes::classify;
use crate::error::LintError;
use crate::models::{Diagnostic, SyntaxFailure};
use crate::reporter::DiagnosticSink;
use std::path::Path;
use tracing::warn;

const ENGINE: &str = "pyflakes";

/// Event parsed from engine output, replayed into a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlakeEvent {
    Diagnostic(Diagnostic),
    Syntax(SyntaxFailure),
    Unexpected { path: String, message: String },
}

#[derive(Debug, Default)]
/// Parsed events plus any lines that did not fit the protocol.
pub struct ParsedOutput {
    pub events: Vec<FlakeEvent>,
    pub unparsed: Vec<String>,
    /// Compile-time warnings Python printed for the checked file.
    pub warnings: Vec<String>,
}

/// Runs pyflakes through a Python interpreter.
pub struct PyflakesEngine {
    python: String,
}

impl PyflakesEngine {
    pub fn new(python: &str) -> Self {
        Self {
            python: python.to_string(),
        }
    }
}

impl SemanticEngine for PyflakesEngine {
    fn check_path(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<EngineStatus, LintError> {
        let output = run_module(ENGINE, &self.python, "pyflakes", &[], path)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let parsed = parse_output(&path.to_string_lossy(), &stdout, &stderr);
        if parsed.events.is_empty() && !parsed.unparsed.is_empty() {
            return Err(LintError::EngineOutput {
                engine: ENGINE,
                message: parsed.unparsed.join("\n"),
            });
        }
        for line in &parsed.warnings {
            warn!(engine = ENGINE, file = %path.display(), warning = %line, "python warning");
        }
        for line in &parsed.unparsed {
            warn!(engine = ENGINE, line = %line, "ignoring unrecognized engine output");
        }
        Ok(replay(&parsed.events, sink))
    }
}

/// Feed parsed events into `sink` in order.
pub fn replay(events: &[FlakeEvent], sink: &mut dyn DiagnosticSink) -> EngineStatus {
    let mut status = EngineStatus::default();
    for event in events {
        match event {
            FlakeEvent::Diagnostic(d) => {
                status.emitted += 1;
                sink.on_diagnostic(d);
            }
            FlakeEvent::Syntax(f) => {
                status.fatal = true;
                sink.on_syntax_failure(f);
            }
            FlakeEvent::Unexpected { path, message } => {
                status.fatal = true;
                sink.on_unexpected_error(path, message);
            }
        }
    }
    status
}

/// Parse pyflakes stdout/stderr for a run over the single file `path`.
pub fn parse_output(path: &str, stdout: &str, stderr: &str) -> ParsedOutput {
    let mut out = ParsedOutput::default();

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        match strip_path(line, path).and_then(split_location) {
            Some((row, col, message)) => {
                let (kind, args) = classify(message);
                let column = col.map(|c| c.saturating_sub(1)).unwrap_or(0);
                out.events.push(FlakeEvent::Diagnostic(Diagnostic::new(
                    path, row, column, kind, args,
                )));
            }
            None => out.unparsed.push(line.to_string()),
        }
    }

    let lines: Vec<&str> = stderr.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;
        if line.trim().is_empty() {
            continue;
        }
        let Some(rest) = strip_path(line, path) else {
            out.unparsed.push(line.to_string());
            continue;
        };
        match split_location(rest) {
            Some((row, None, message)) if is_warning(message) => {
                // The warnings module follows with the indented source line.
                if let Some(next) = lines.get(i) {
                    if next.starts_with(char::is_whitespace) && strip_path(next, path).is_none() {
                        i += 1;
                    }
                }
                out.warnings.push(format!("{}:{}: {}", path, row, message));
            }
            Some((row, offset, message)) => {
                let mut text = String::new();
                if let Some(next) = lines.get(i) {
                    if strip_path(next, path).is_none() {
                        text = next.to_string();
                        i += 1;
                    }
                }
                if offset.is_some() {
                    if let Some(next) = lines.get(i) {
                        if next.trim() == "^" {
                            i += 1;
                        }
                    }
                }
                out.events.push(FlakeEvent::Syntax(SyntaxFailure {
                    path: path.to_string(),
                    message: message.to_string(),
                    line: row,
                    offset,
                    text,
                }));
            }
            None => {
                let message = rest.strip_prefix(' ').unwrap_or(rest);
                out.events.push(FlakeEvent::Unexpected {
                    path: path.to_string(),
                    message: message.to_string(),
                });
            }
        }
    }
    out
}

/// `SyntaxWarning: ...`, `DeprecationWarning: ...` and other warning categories.
fn is_warning(message: &str) -> bool {
    message.split_once(": ").is_some_and(|(category, _)| {
        category.ends_with("Warning")
            && category.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
