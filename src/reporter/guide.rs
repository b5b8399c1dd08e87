//! Error handling for the plugin framework's raw results.
//!
//! [`StyleGuide::handle_error`] applies the framework's native rules to one
//! result tuple: select/ignore decision, then inline `# noqa` comments on the
//! physical line, then formatting onto the console.

use super::style::{format_named, resolve_format, Field};
use crate::console::Console;
use crate::filter::PrefixPolicy;
use once_cell::sync::Lazy;
use regex::Regex;

/// `path:row:col CODE - text`
pub const CATEGORY_FORMAT: &str = "%(path)s:%(row)d:%(col)d %(code)s - %(text)s";

static NOQA_INLINE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)#\s*noqa(?::[\s]?(?P<codes>[A-Z]+[0-9]+(?:[,\s]+[A-Z]+[0-9]+)*))?").ok()
});

/// Whether an inline `# noqa` comment on `physical_line` suppresses `code`.
///
/// A bare `# noqa` suppresses everything; `# noqa: E501,W2` only the listed
/// codes and code prefixes.
pub fn noqa_suppresses(physical_line: &str, code: &str) -> bool {
    let Some(caps) = NOQA_INLINE.as_ref().and_then(|re| re.captures(physical_line)) else {
        return false;
    };
    match caps.name("codes") {
        None => true,
        Some(codes) => codes
            .as_str()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|c| !c.is_empty())
            .any(|c| code.eq_ignore_ascii_case(c) || code.starts_with(c)),
    }
}

/// Decision + formatting for plugin framework results.
pub struct StyleGuide {
    console: Console,
    policy: PrefixPolicy,
    format: String,
    disable_noqa: bool,
}

impl StyleGuide {
    pub fn new(console: Console, policy: PrefixPolicy) -> Self {
        Self {
            console,
            policy,
            format: CATEGORY_FORMAT.to_string(),
            disable_noqa: false,
        }
    }

    /// Use a preset name (`default`, `pylint`) or a custom format string.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = resolve_format(format);
        self
    }

    pub fn with_disable_noqa(mut self, disable: bool) -> Self {
        self.disable_noqa = disable;
        self
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Handle one result. `column_number` is 0-based.
    ///
    /// Returns true when the error was reported.
    pub fn handle_error(
        &self,
        code: &str,
        filename: &str,
        line_number: usize,
        column_number: usize,
        text: &str,
        physical_line: Option<&str>,
    ) -> bool {
        if self.policy.ignores(code) {
            return false;
        }
        if !self.disable_noqa {
            if let Some(line) = physical_line {
                if noqa_suppresses(line, code) {
                    return false;
                }
            }
        }
        let line = format_named(
            &self.format,
            &[
                ("path", Field::Str(filename)),
                ("row", Field::Int(line_number)),
                ("col", Field::Int(column_number + 1)),
                ("code", Field::Str(code)),
                ("text", Field::Str(text)),
            ],
        );
        self.console.print(&line);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(ignore: &[&str]) -> (StyleGuide, Console) {
        let console = Console::buffer(false);
        let ignore: Vec<String> = ignore.iter().map(|s| s.to_string()).collect();
        let policy = PrefixPolicy::explicit(&[], &ignore);
        (StyleGuide::new(console.clone(), policy), console)
    }

    #[test]
    fn test_noqa_variants() {
        assert!(noqa_suppresses("import os  # noqa", "F401"));
        assert!(noqa_suppresses("import os  # NOQA:F401", "F401"));
        assert!(noqa_suppresses("x = 1  # noqa: E501, W2", "W291"));
        assert!(!noqa_suppresses("x = 1  # noqa: E501", "F841"));
        assert!(!noqa_suppresses("x = 1", "F841"));
    }

    #[test]
    fn test_reported_error_uses_category_format() {
        let (g, console) = guide(&[]);
        let reported = g.handle_error("F401", "a.py", 1, 0, "'os' imported but unused", Some("import os"));
        assert!(reported);
        assert_eq!(console.take(), "a.py:1:1 F401 - 'os' imported but unused\n");
    }

    #[test]
    fn test_ignored_and_noqa_errors_are_not_reported() {
        let (g, console) = guide(&["E5"]);
        assert!(!g.handle_error("E501", "a.py", 2, 79, "line too long", None));
        assert!(!g.handle_error("F401", "a.py", 1, 0, "unused", Some("import os  # noqa")));
        assert_eq!(console.take(), "");
    }

    #[test]
    fn test_disable_noqa_reports_anyway() {
        let (g, console) = guide(&[]);
        let g = g.with_disable_noqa(true).with_format("default");
        assert!(g.handle_error("F401", "a.py", 1, 0, "unused", Some("import os  # noqa")));
        assert_eq!(console.take(), "a.py:1:1: F401 unused\n");
    }
}
