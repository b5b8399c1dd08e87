//! Reporters: callback targets that engines feed while checking a file.
//!
//! Engines never print. They push events into a [`DiagnosticSink`] (semantic
//! checker) or a [`StyleSink`] (style checker); the reporters here filter,
//! count and render those events on the [`Console`](crate::console::Console)
//! they were constructed with.

pub mod flakes;
pub mod guide;
pub mod style;

pub use flakes::FlakeReporter;
pub use guide::StyleGuide;
pub use style::{StyleOptions, StyleReporter};

use crate::models::{Diagnostic, SyntaxFailure};

/// Receiver for semantic checker events.
pub trait DiagnosticSink {
    /// A finding. Subject to the ignore set; counted when not ignored.
    fn on_diagnostic(&mut self, diagnostic: &Diagnostic);
    /// The file could not be parsed. Never filtered, never counted.
    fn on_syntax_failure(&mut self, failure: &SyntaxFailure);
    /// The file could not be processed at all (unreadable, engine missing).
    fn on_unexpected_error(&mut self, path: &str, message: &str);
}

/// Receiver for style checker events.
pub trait StyleSink {
    /// Start a new file; resets per-file counts.
    fn init_file(&mut self, path: &str);
    /// `text` is `"CODE message"`. Returns the code when the error was
    /// counted and printed.
    fn error(&mut self, line_number: usize, offset: usize, text: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Per-file count of non-suppressed diagnostics.
pub struct Session {
    count: usize,
}

impl Session {
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn record(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
