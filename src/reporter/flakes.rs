//! Console reporter for the semantic checker.

use super::{DiagnosticSink, Session};
use crate::console::Console;
use crate::filter::CodeFilter;
use crate::models::{Diagnostic, SyntaxFailure};

/// Renders semantic diagnostics, applying the ignore set first.
///
/// Output lines look like `path:line:col message`, or
/// `path:line:col Category - message` when the category prefix is enabled.
pub struct FlakeReporter {
    console: Console,
    filter: CodeFilter,
    show_category: bool,
    session: Session,
}

impl FlakeReporter {
    pub fn new(console: Console, filter: CodeFilter) -> Self {
        Self {
            console,
            filter,
            show_category: false,
            session: Session::default(),
        }
    }

    /// Prefix each line with the diagnostic category.
    pub fn with_category(mut self, show: bool) -> Self {
        self.show_category = show;
        self
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Render one diagnostic line without filtering or counting.
    pub fn render(&self, d: &Diagnostic) -> String {
        if self.show_category {
            format!(
                "{}:{}:{} {} - {}",
                d.path,
                d.line,
                d.column + 1,
                d.kind.name(),
                d.message()
            )
        } else {
            format!("{}:{}:{} {}", d.path, d.line, d.column + 1, d.message())
        }
    }
}

impl DiagnosticSink for FlakeReporter {
    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        if self.filter.should_ignore(diagnostic.kind.name()) {
            return;
        }
        self.session.record();
        self.console.print(&self.render(diagnostic));
    }

    fn on_syntax_failure(&mut self, failure: &SyntaxFailure) {
        let mut body = format!("{}\n{}", failure.summary(), failure.source_line());
        if let Some(caret) = failure.caret_line() {
            body.push('\n');
            body.push_str(&caret);
        }
        self.console.panel("Syntax Error", &body);
    }

    fn on_unexpected_error(&mut self, path: &str, message: &str) {
        self.console
            .panel("Unexpected Error", &format!("{}: {}", path, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::FlakeKind;

    fn unused_import(col: usize) -> Diagnostic {
        Diagnostic::new("pkg/a.py", 2, col, FlakeKind::UnusedImport, vec!["'os'".into()])
    }

    #[test]
    fn test_diagnostic_line_adds_one_to_column() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console.clone(), CodeFilter::default());
        rep.on_diagnostic(&unused_import(0));
        rep.on_diagnostic(&unused_import(7));
        assert_eq!(
            console.take(),
            "pkg/a.py:2:1 'os' imported but unused\npkg/a.py:2:8 'os' imported but unused\n"
        );
        assert_eq!(rep.session().count(), 2);
    }

    #[test]
    fn test_category_prefix_variant() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console.clone(), CodeFilter::default()).with_category(true);
        rep.on_diagnostic(&unused_import(4));
        assert_eq!(
            console.take(),
            "pkg/a.py:2:5 UnusedImport - 'os' imported but unused\n"
        );
    }

    #[test]
    fn test_ignored_category_is_silent_and_uncounted() {
        let console = Console::buffer(false);
        let filter = CodeFilter::new(["F401"], true);
        let mut rep = FlakeReporter::new(console.clone(), filter);
        rep.on_diagnostic(&unused_import(0));
        assert_eq!(console.take(), "");
        assert_eq!(rep.session().count(), 0);

        let other = Diagnostic::new("pkg/a.py", 5, 4, FlakeKind::UndefinedName, vec!["'x'".into()]);
        rep.on_diagnostic(&other);
        assert_eq!(rep.session().count(), 1);
        assert_eq!(console.take(), "pkg/a.py:5:5 undefined name 'x'\n");
    }

    #[test]
    fn test_syntax_failure_panel_with_caret() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console.clone(), CodeFilter::default());
        rep.on_syntax_failure(&SyntaxFailure {
            path: "bad.py".into(),
            message: "invalid syntax".into(),
            line: 1,
            offset: Some(6),
            text: "def f(:\n".into(),
        });
        let out = console.take();
        assert!(out.contains(" Syntax Error "));
        assert!(out.contains("│ bad.py:1:6: invalid syntax │"));
        assert!(out.contains("│ def f(:"));
        assert!(out.contains("│      ^"));
        assert_eq!(rep.session().count(), 0);
    }

    #[test]
    fn test_syntax_failure_panel_without_offset() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console.clone(), CodeFilter::default());
        rep.on_syntax_failure(&SyntaxFailure {
            path: "bad.py".into(),
            message: "unexpected EOF while parsing".into(),
            line: 3,
            offset: None,
            text: "x = (\n".into(),
        });
        let out = console.take();
        assert!(out.contains("bad.py:3: unexpected EOF while parsing"));
        assert!(!out.contains('^'));
        // border, summary, source line, border
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_unexpected_error_panel() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console.clone(), CodeFilter::default());
        rep.on_unexpected_error("gone.py", "No such file or directory");
        let out = console.take();
        assert!(out.contains(" Unexpected Error "));
        assert!(out.contains("gone.py: No such file or directory"));
    }

    #[test]
    fn test_reset_starts_a_new_session() {
        let console = Console::buffer(false);
        let mut rep = FlakeReporter::new(console, CodeFilter::default());
        rep.on_diagnostic(&unused_import(0));
        rep.reset();
        assert_eq!(rep.session().count(), 0);
    }
}
