//! Plugin framework adapter: `python -m flake8 <file>`.
//!
//! flake8 runs with one job and with inline `# noqa` handling disabled, and
//! prints every result as a tab-separated record so the decision step
//! ([`StyleGuide`](crate::reporter::StyleGuide)) sees the raw results.

use super::{run_module, PluginEngine};
use crate::error::LintError;
use crate::models::Violation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const ENGINE: &str = "flake8";

/// `code<TAB>row<TAB>col<TAB>text`
const RECORD_FORMAT: &str = "%(code)s\t%(row)d\t%(col)d\t%(text)s";

/// Runs flake8 through a Python interpreter, one file at a time.
pub struct Flake8Engine {
    python: String,
    config: Option<PathBuf>,
}

impl Flake8Engine {
    pub fn new(python: &str, config: Option<PathBuf>) -> Self {
        Self {
            python: python.to_string(),
            config,
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--jobs=1".to_string(),
            "--disable-noqa".to_string(),
            format!("--format={}", RECORD_FORMAT),
        ];
        if let Some(cfg) = &self.config {
            args.push(format!("--config={}", cfg.display()));
        }
        args
    }
}

impl PluginEngine for Flake8Engine {
    fn run_checks(&self, path: &Path) -> Result<Vec<Violation>, LintError> {
        let output = run_module(ENGINE, &self.python, "flake8", &self.args(), path)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(err) => {
                warn!(engine = ENGINE, file = %path.display(), error = %err, "physical lines unavailable");
                String::new()
            }
        };
        interpret(output.status.code(), &stdout, &stderr, &source)
    }
}

/// Turn one flake8 run into results.
///
/// Exit 0 means clean and exit 1 means results were printed. A failing run
/// that printed no records (missing module, broken config) is an error.
pub fn interpret(
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
    source: &str,
) -> Result<Vec<Violation>, LintError> {
    let failed = || {
        let message = match stderr.trim() {
            "" => match code {
                Some(c) => format!("exited with status {} and no results", c),
                None => "terminated by signal".to_string(),
            },
            text => text.to_string(),
        };
        LintError::EngineOutput {
            engine: ENGINE,
            message,
        }
    };
    if !matches!(code, Some(0) | Some(1)) {
        return Err(failed());
    }
    let results = parse_results(stdout, source);
    if code != Some(0) && results.is_empty() {
        return Err(failed());
    }
    Ok(results)
}

/// Parse tab-separated records; `source` supplies the physical lines.
///
/// Columns are converted to 0-based. Lines that are not records are skipped.
pub fn parse_results(stdout: &str, source: &str) -> Vec<Violation> {
    let lines: Vec<&str> = source.lines().collect();
    stdout
        .lines()
        .filter_map(|record| {
            let mut parts = record.splitn(4, '\t');
            let code = parts.next()?.trim();
            let line: usize = parts.next()?.trim().parse().ok()?;
            let col: usize = parts.next()?.trim().parse().ok()?;
            let text = parts.next()?;
            if code.is_empty() {
                return None;
            }
            Some(Violation {
                code: code.to_string(),
                line,
                column: col.saturating_sub(1),
                text: text.to_string(),
                physical_line: line
                    .checked_sub(1)
                    .and_then(|i| lines.get(i))
                    .map(|l| l.to_string()),
            })
        })
        .collect()
}
