//! Diagnostic events emitted by engines and consumed by reporters.

use crate::codes::FlakeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One semantic finding.
///
/// `column` is the engine's native 0-based column; renderers add one.
pub struct Diagnostic {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub kind: FlakeKind,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(path: &str, line: usize, column: usize, kind: FlakeKind, args: Vec<String>) -> Self {
        Self {
            path: path.to_string(),
            line,
            column,
            kind,
            args,
        }
    }

    /// Message template with the positional arguments interpolated.
    pub fn message(&self) -> String {
        interpolate(self.kind.template(), &self.args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parse failure: the file could not be analysed at all.
pub struct SyntaxFailure {
    pub path: String,
    pub message: String,
    pub line: usize,
    pub offset: Option<usize>,
    pub text: String,
}

impl SyntaxFailure {
    /// `path:line[:offset]: message`
    pub fn summary(&self) -> String {
        match self.offset {
            Some(offset) => format!("{}:{}:{}: {}", self.path, self.line, offset, self.message),
            None => format!("{}:{}: {}", self.path, self.line, self.message),
        }
    }

    /// Last line of the offending source text.
    pub fn source_line(&self) -> &str {
        self.text.lines().last().unwrap_or("")
    }

    /// Marker line pointing at `offset`, or `None` without an offset.
    ///
    /// Non-whitespace characters before the offset become spaces so tabs in
    /// the source line keep the caret aligned.
    pub fn caret_line(&self) -> Option<String> {
        let offset = self.offset?;
        let mut caret: String = self
            .source_line()
            .chars()
            .take(offset.saturating_sub(1))
            .map(|c| if c.is_whitespace() { c } else { ' ' })
            .collect();
        caret.push('^');
        Some(caret)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One raw result tuple from the plugin framework for a single file.
///
/// `column` is 0-based like [`Diagnostic::column`].
pub struct Violation {
    pub code: String,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub physical_line: Option<String>,
}

/// printf-style interpolation of pre-rendered arguments.
///
/// `%r`, `%s` and `%d` each consume the next argument; `%%` is a literal
/// percent. Missing arguments leave the placeholder in place.
pub fn interpolate(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('r' | 's' | 'd')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(text: &str, offset: Option<usize>) -> SyntaxFailure {
        SyntaxFailure {
            path: "pkg/mod.py".into(),
            message: "invalid syntax".into(),
            line: 1,
            offset,
            text: text.into(),
        }
    }

    #[test]
    fn test_caret_line_replaces_prefix_with_spaces() {
        let f = failure("def f(:\n", Some(6));
        assert_eq!(f.source_line(), "def f(:");
        assert_eq!(f.caret_line().as_deref(), Some("     ^"));
        assert_eq!(f.summary(), "pkg/mod.py:1:6: invalid syntax");
    }

    #[test]
    fn test_caret_line_keeps_tabs() {
        let f = failure("\tx = (\n", Some(4));
        assert_eq!(f.caret_line().as_deref(), Some("\t  ^"));
    }

    #[test]
    fn test_no_offset_means_no_caret_and_no_column() {
        let f = failure("def f(:\n", None);
        assert_eq!(f.caret_line(), None);
        assert_eq!(f.summary(), "pkg/mod.py:1: invalid syntax");
    }

    #[test]
    fn test_source_line_uses_last_line_of_text() {
        let f = failure("x = 1\ny = (\n", Some(5));
        assert_eq!(f.source_line(), "y = (");
    }

    #[test]
    fn test_interpolate_placeholders() {
        let args = vec!["'x'".to_string(), "3".to_string()];
        assert_eq!(
            interpolate("redefinition of unused %r from line %r", &args),
            "redefinition of unused 'x' from line 3"
        );
        assert_eq!(interpolate("'...' %% ... has %d", &["2".into()]), "'...' % ... has 2");
        assert_eq!(interpolate("undefined name %r", &[]), "undefined name %r");
    }

    #[test]
    fn test_diagnostic_message() {
        let d = Diagnostic::new("a.py", 3, 0, FlakeKind::UnusedImport, vec!["'os'".into()]);
        assert_eq!(d.message(), "'os' imported but unused");
    }
}
