//! Style engine adapter: `python -m pycodestyle <file>`.
//!
//! The engine is asked to report every E/W/C9 code in its default format so
//! that select/ignore decisions stay with the [`StyleSink`]; only the line
//! length limit is passed through because it changes what gets detected.

use super::{run_module, split_location, strip_path, StyleEngine};
use crate::error::LintError;
use crate::reporter::StyleSink;
use std::path::Path;

const ENGINE: &str = "pycodestyle";

/// Runs pycodestyle through a Python interpreter.
pub struct PycodestyleEngine {
    python: String,
    max_line_length: usize,
}

impl PycodestyleEngine {
    pub fn new(python: &str, max_line_length: usize) -> Self {
        Self {
            python: python.to_string(),
            max_line_length,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "--select=E,W,C90".to_string(),
            "--format=default".to_string(),
            format!("--max-line-length={}", self.max_line_length),
        ]
    }
}

impl StyleEngine for PycodestyleEngine {
    fn check_file(&self, path: &Path, sink: &mut dyn StyleSink) -> Result<usize, LintError> {
        let output = run_module(ENGINE, &self.python, "pycodestyle", &self.args(), path)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let errors = parse_output(&path.to_string_lossy(), &stdout);
        if errors.is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LintError::EngineOutput {
                engine: ENGINE,
                message: stderr.trim().to_string(),
            });
        }
        for e in &errors {
            sink.error(e.line, e.offset, &e.text);
        }
        Ok(errors.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One raw style error; `offset` is 0-based and `text` is `"CODE message"`.
pub struct StyleError {
    pub line: usize,
    pub offset: usize,
    pub text: String,
}

/// Parse default-format output (`path:row:col: CODE text`) for one file.
pub fn parse_output(path: &str, stdout: &str) -> Vec<StyleError> {
    stdout
        .lines()
        .filter_map(|line| strip_path(line, path))
        .filter_map(split_location)
        .map(|(row, col, text)| StyleError {
            line: row,
            offset: col.unwrap_or(1).saturating_sub(1),
            text: text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::reporter::{StyleOptions, StyleReporter};

    #[test]
    fn test_parse_default_format() {
        let stdout = "a.py:1:80: E501 line too long (81 > 79 characters)\n\
                      a.py:3:1: W391 blank line at end of file\n\
                      garbage line\n";
        let errors = parse_output("a.py", stdout);
        assert_eq!(
            errors,
            vec![
                StyleError {
                    line: 1,
                    offset: 79,
                    text: "E501 line too long (81 > 79 characters)".into(),
                },
                StyleError {
                    line: 3,
                    offset: 0,
                    text: "W391 blank line at end of file".into(),
                },
            ]
        );
    }

    #[test]
    fn test_parsed_errors_round_trip_through_reporter_columns() {
        let errors = parse_output("a.py", "a.py:2:5: E225 missing whitespace around operator\n");
        let console = Console::buffer(false);
        let mut rep = StyleReporter::new(console.clone(), StyleOptions::default());
        rep.init_file("a.py");
        for e in &errors {
            rep.error(e.line, e.offset, &e.text);
        }
        assert_eq!(console.take(), "a.py:2:5: E225 missing whitespace around operator\n");
    }

    #[test]
    fn test_engine_args_pass_line_length() {
        let engine = PycodestyleEngine::new("python3", 100);
        assert!(engine.args().contains(&"--max-line-length=100".to_string()));
    }
}
