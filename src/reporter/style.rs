//! Console reporter for the style checker.
//!
//! Mirrors the style checker's own bookkeeping: per-code `counters` and
//! first-seen `messages`, an `expected` set whose codes are counted but not
//! reported, and `file_errors` / `total_errors`. Each reported error is
//! printed through a printf-style format with the named fields `path`,
//! `row`, `col`, `code` and `text`.

use super::StyleSink;
use crate::console::Console;
use crate::filter::PrefixPolicy;
use std::collections::{BTreeMap, BTreeSet};

/// `path:row:col: CODE text`
pub const DEFAULT_FORMAT: &str = "%(path)s:%(row)d:%(col)d: %(code)s %(text)s";
/// `path:row: [CODE] text`
pub const PYLINT_FORMAT: &str = "%(path)s:%(row)d: [%(code)s] %(text)s";

/// Map a preset name to its format string; anything else is a custom format.
pub fn resolve_format(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "default" => DEFAULT_FORMAT.to_string(),
        "pylint" => PYLINT_FORMAT.to_string(),
        _ => name.to_string(),
    }
}

#[derive(Debug, Clone)]
/// Style checker options resolved from configuration.
pub struct StyleOptions {
    pub policy: PrefixPolicy,
    pub expected: BTreeSet<String>,
    pub format: String,
    pub max_line_length: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            policy: PrefixPolicy::new(&[], &[]),
            expected: BTreeSet::new(),
            format: DEFAULT_FORMAT.to_string(),
            max_line_length: 79,
        }
    }
}

/// Value substituted into a named format field.
pub enum Field<'a> {
    Str(&'a str),
    Int(usize),
}

/// Expand `%(name)s` / `%(name)d` fields and `%%` in `fmt`.
///
/// Unknown field names expand to an empty string; malformed placeholders
/// are copied through unchanged.
pub fn format_named(fmt: &str, fields: &[(&str, Field<'_>)]) -> String {
    let mut out = String::with_capacity(fmt.len() + 32);
    let mut rest = fmt;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        let parsed = tail.strip_prefix('(').and_then(|t| {
            let close = t.find(')')?;
            let spec = t[close + 1..].chars().next()?;
            Some((&t[..close], spec, &t[close + 1 + spec.len_utf8()..]))
        });
        match parsed {
            Some((name, 's' | 'd' | 'r', after)) => {
                if let Some((_, value)) = fields.iter().find(|(n, _)| *n == name) {
                    match value {
                        Field::Str(s) => out.push_str(s),
                        Field::Int(i) => out.push_str(&i.to_string()),
                    }
                }
                rest = after;
            }
            _ => {
                out.push('%');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Style reporter printing to an injected console.
pub struct StyleReporter {
    console: Console,
    options: StyleOptions,
    filename: String,
    line_offset: usize,
    pub counters: BTreeMap<String, usize>,
    pub messages: BTreeMap<String, String>,
    pub file_errors: usize,
    pub total_errors: usize,
}

impl StyleReporter {
    pub fn new(console: Console, options: StyleOptions) -> Self {
        Self {
            console,
            options,
            filename: String::new(),
            line_offset: 0,
            counters: BTreeMap::new(),
            messages: BTreeMap::new(),
            file_errors: 0,
            total_errors: 0,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }
}

impl StyleSink for StyleReporter {
    fn init_file(&mut self, path: &str) {
        self.filename = path.to_string();
        self.file_errors = 0;
    }

    fn error(&mut self, line_number: usize, offset: usize, text: &str) -> Option<String> {
        let code: String = text.chars().take(4).collect();
        if self.options.policy.ignores(&code) {
            return None;
        }
        let message = text.get(5..).unwrap_or("").to_string();
        *self.counters.entry(code.clone()).or_insert(0) += 1;
        self.messages.entry(code.clone()).or_insert_with(|| message.clone());
        // Expected codes are tallied but not reported.
        if self.options.expected.contains(&code) {
            return None;
        }
        self.file_errors += 1;
        self.total_errors += 1;

        let line = format_named(
            &self.options.format,
            &[
                ("path", Field::Str(&self.filename)),
                ("row", Field::Int(self.line_offset + line_number)),
                ("col", Field::Int(offset + 1)),
                ("code", Field::Str(&code)),
                ("text", Field::Str(&message)),
            ],
        );
        self.console.print(&line);
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter(options: StyleOptions) -> (StyleReporter, Console) {
        let console = Console::buffer(false);
        (StyleReporter::new(console.clone(), options), console)
    }

    #[test]
    fn test_format_named_presets() {
        let fields = [
            ("path", Field::Str("a.py")),
            ("row", Field::Int(3)),
            ("col", Field::Int(80)),
            ("code", Field::Str("E501")),
            ("text", Field::Str("line too long (88 > 79 characters)")),
        ];
        assert_eq!(
            format_named(DEFAULT_FORMAT, &fields),
            "a.py:3:80: E501 line too long (88 > 79 characters)"
        );
        assert_eq!(
            format_named(PYLINT_FORMAT, &fields),
            "a.py:3: [E501] line too long (88 > 79 characters)"
        );
        assert_eq!(format_named("100%% %(code)s %(nope)s|%x", &fields), "100% E501 |%x");
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format("Pylint"), PYLINT_FORMAT);
        assert_eq!(resolve_format("%(code)s"), "%(code)s");
    }

    #[test]
    fn test_error_prints_counts_and_returns_code() {
        let (mut rep, console) = reporter(StyleOptions::default());
        rep.init_file("pkg/a.py");
        let code = rep.error(3, 79, "E501 line too long (88 > 79 characters)");
        assert_eq!(code.as_deref(), Some("E501"));
        assert_eq!(
            console.take(),
            "pkg/a.py:3:80: E501 line too long (88 > 79 characters)\n"
        );
        rep.error(9, 0, "E501 line too long (90 > 79 characters)");
        assert_eq!(rep.counters.get("E501"), Some(&2));
        assert_eq!(
            rep.messages.get("E501").map(String::as_str),
            Some("line too long (88 > 79 characters)")
        );
        assert_eq!(rep.file_errors, 2);
    }

    #[test]
    fn test_ignored_code_is_not_counted() {
        let (mut rep, console) = reporter(StyleOptions::default());
        rep.init_file("a.py");
        assert_eq!(rep.error(1, 4, "E226 missing whitespace around arithmetic operator"), None);
        assert!(rep.counters.is_empty());
        assert_eq!(rep.file_errors, 0);
        assert_eq!(console.take(), "");
    }

    #[test]
    fn test_expected_code_counted_but_not_reported() {
        let mut options = StyleOptions::default();
        options.expected.insert("W291".into());
        let (mut rep, console) = reporter(options);
        rep.init_file("a.py");
        assert_eq!(rep.error(2, 10, "W291 trailing whitespace"), None);
        assert_eq!(rep.counters.get("W291"), Some(&1));
        assert_eq!(rep.file_errors, 0);
        assert_eq!(rep.total_errors, 0);
        assert_eq!(console.take(), "");
    }

    #[test]
    fn test_init_file_resets_file_errors_only() {
        let (mut rep, _console) = reporter(StyleOptions::default());
        rep.init_file("a.py");
        rep.error(1, 0, "E101 indentation contains mixed spaces and tabs");
        rep.init_file("b.py");
        assert_eq!(rep.file_errors, 0);
        assert_eq!(rep.total_errors, 1);
    }
}
