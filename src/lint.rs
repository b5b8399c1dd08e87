//! Checker invokers and the lint runner.
//!
//! An invoker wraps one engine (or a pair), checks one file per call and
//! reduces everything the engine reported to a [`CheckOutcome`]. The runner
//! fans files out over rayon, giving every worker its own invoker and
//! buffered console so sessions are never shared and output stays in input
//! order.

use crate::console::Console;
use crate::engine::{
    Flake8Engine, PluginEngine, PycodestyleEngine, PyflakesEngine, SemanticEngine, StyleEngine,
};
use crate::error::LintError;
use crate::models::{CheckOutcome, FileReport, RunReport};
use crate::paths::{display_path, Exclusions};
use crate::reporter::{DiagnosticSink, FlakeReporter, StyleGuide, StyleReporter, StyleSink};
use crate::settings::LintSettings;
use clap::ValueEnum;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Check one file at a time.
pub trait Checker {
    /// Check `path`. Each call starts from a fresh session.
    fn check(&mut self, path: &Path) -> CheckOutcome;
    /// Whether configuration excludes `path`; callers skip it without
    /// counting it as checked.
    fn excluded(&self, path: &Path) -> bool;
    /// Whether separate instances may run on several threads at once.
    fn supports_parallel(&self) -> bool {
        true
    }
}

impl<C: Checker + ?Sized> Checker for Box<C> {
    fn check(&mut self, path: &Path) -> CheckOutcome {
        (**self).check(path)
    }

    fn excluded(&self, path: &Path) -> bool {
        (**self).excluded(path)
    }

    fn supports_parallel(&self) -> bool {
        (**self).supports_parallel()
    }
}

fn report_engine_error(console: &Console, path: &str, err: &LintError) {
    debug!(file = path, error = %err, "engine failed");
    console.panel("Unexpected Error", &format!("{}: {}", path, err));
}

/// Semantic checker: passes when nothing fatal happened and no diagnostic
/// survived the ignore set.
pub struct SemanticLinter<E> {
    engine: E,
    reporter: FlakeReporter,
    exclusions: Exclusions,
}

impl<E: SemanticEngine> SemanticLinter<E> {
    pub fn new(engine: E, reporter: FlakeReporter, exclusions: Exclusions) -> Self {
        Self {
            engine,
            reporter,
            exclusions,
        }
    }
}

impl<E: SemanticEngine> Checker for SemanticLinter<E> {
    fn check(&mut self, path: &Path) -> CheckOutcome {
        self.reporter.reset();
        match self.engine.check_path(path, &mut self.reporter) {
            Ok(status) => (!status.fatal && self.reporter.session().count() == 0).into(),
            Err(err) => {
                let shown = path.to_string_lossy();
                self.reporter.on_unexpected_error(&shown, &err.to_string());
                CheckOutcome::Fail
            }
        }
    }

    fn excluded(&self, path: &Path) -> bool {
        self.exclusions.is_excluded(path)
    }
}

/// Style checker: passes when the reporter counted no errors for the file.
pub struct StyleLinter<E> {
    engine: E,
    reporter: StyleReporter,
    exclusions: Exclusions,
}

impl<E: StyleEngine> StyleLinter<E> {
    pub fn new(engine: E, reporter: StyleReporter, exclusions: Exclusions) -> Self {
        Self {
            engine,
            reporter,
            exclusions,
        }
    }
}

impl<E: StyleEngine> Checker for StyleLinter<E> {
    fn check(&mut self, path: &Path) -> CheckOutcome {
        let shown = path.to_string_lossy();
        self.reporter.init_file(&shown);
        match self.engine.check_file(path, &mut self.reporter) {
            Ok(_) => (self.reporter.file_errors == 0).into(),
            Err(err) => {
                report_engine_error(self.reporter.console(), &shown, &err);
                CheckOutcome::Fail
            }
        }
    }

    fn excluded(&self, path: &Path) -> bool {
        self.exclusions.is_excluded(path)
    }
}

/// Semantic and style checks on the same file; passes only if both pass.
///
/// Both checks always run so the output is complete.
pub struct CombinedLinter<S, T> {
    semantic: SemanticLinter<S>,
    style: StyleLinter<T>,
}

impl<S: SemanticEngine, T: StyleEngine> CombinedLinter<S, T> {
    pub fn new(semantic: SemanticLinter<S>, style: StyleLinter<T>) -> Self {
        Self { semantic, style }
    }
}

impl<S: SemanticEngine, T: StyleEngine> Checker for CombinedLinter<S, T> {
    fn check(&mut self, path: &Path) -> CheckOutcome {
        let semantic = self.semantic.check(path);
        let style = self.style.check(path);
        semantic.and(style)
    }

    fn excluded(&self, path: &Path) -> bool {
        self.style.excluded(path)
    }
}

/// Plugin framework checker. Results go through the framework's own
/// decision rules; any reported result fails the file with its details
/// already printed.
pub struct Flake8Linter<E> {
    engine: E,
    guide: StyleGuide,
    exclusions: Exclusions,
}

impl<E: PluginEngine> Flake8Linter<E> {
    pub fn new(engine: E, guide: StyleGuide, exclusions: Exclusions) -> Self {
        Self {
            engine,
            guide,
            exclusions,
        }
    }
}

impl<E: PluginEngine> Checker for Flake8Linter<E> {
    fn check(&mut self, path: &Path) -> CheckOutcome {
        let shown = path.to_string_lossy();
        let results = match self.engine.run_checks(path) {
            Ok(r) => r,
            Err(err) => {
                report_engine_error(self.guide.console(), &shown, &err);
                return CheckOutcome::Fail;
            }
        };
        let mut reported = false;
        for v in &results {
            reported |= self.guide.handle_error(
                &v.code,
                &shown,
                v.line,
                v.column,
                &v.text,
                v.physical_line.as_deref(),
            );
        }
        if reported {
            CheckOutcome::FailReported
        } else {
            CheckOutcome::Pass
        }
    }

    fn excluded(&self, path: &Path) -> bool {
        self.exclusions.is_excluded(path)
    }

    // The framework keeps its own worker pool; one instance at a time.
    fn supports_parallel(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which invoker to run.
pub enum CheckerKind {
    /// Unused names and syntax errors.
    Pyflakes,
    /// Style rules.
    Pycodestyle,
    /// Pyflakes and pycodestyle, both must pass.
    Combined,
    /// The flake8 plugin framework.
    Flake8,
}

impl Default for CheckerKind {
    fn default() -> Self {
        Self::Combined
    }
}

/// Build the invoker for `kind`, printing to `console`.
pub fn build_checker(kind: CheckerKind, settings: &LintSettings, console: Console) -> Box<dyn Checker> {
    let py = settings.python.as_str();
    let exclusions = settings.exclusions.clone();
    let semantic = |show_category: bool| {
        SemanticLinter::new(
            PyflakesEngine::new(py),
            FlakeReporter::new(console.clone(), settings.semantic_ignore.clone())
                .with_category(show_category),
            exclusions.clone(),
        )
    };
    let style = || {
        StyleLinter::new(
            PycodestyleEngine::new(py, settings.style.max_line_length),
            StyleReporter::new(console.clone(), settings.style.clone()),
            exclusions.clone(),
        )
    };
    match kind {
        CheckerKind::Pyflakes => Box::new(semantic(false)),
        CheckerKind::Pycodestyle => Box::new(style()),
        CheckerKind::Combined => Box::new(CombinedLinter::new(semantic(true), style())),
        CheckerKind::Flake8 => Box::new(Flake8Linter::new(
            Flake8Engine::new(py, settings.lint_config.clone()),
            StyleGuide::new(console.clone(), settings.flake8_policy.clone())
                .with_format(&settings.flake8_format)
                .with_disable_noqa(settings.flake8_disable_noqa),
            exclusions.clone(),
        )),
    }
}

/// Run `kind` over `files`; paths in the report are relative to `root`.
pub fn run_lint(
    files: &[PathBuf],
    kind: CheckerKind,
    settings: &LintSettings,
    root: &Path,
    color: bool,
) -> RunReport {
    run_checker(files, root, color, |console| {
        build_checker(kind, settings, console)
    })
}

/// Run invokers produced by `make` over `files`.
///
/// Excluded files are skipped and counted separately. When the invoker
/// supports it, files are checked in parallel with one invoker per worker.
pub fn run_checker<C, M>(files: &[PathBuf], root: &Path, color: bool, make: M) -> RunReport
where
    C: Checker,
    M: Fn(Console) -> C + Sync + Send,
{
    let lead_console = Console::buffer(color);
    let mut lead = make(lead_console.clone());
    let targets: Vec<&PathBuf> = files.iter().filter(|f| !lead.excluded(f)).collect();
    let excluded = files.len() - targets.len();
    let parallel = lead.supports_parallel();
    info!(
        files = targets.len(),
        excluded,
        parallel,
        "starting lint run"
    );

    let results: Vec<FileReport> = if parallel {
        targets
            .par_iter()
            .map_init(
                || {
                    let console = Console::buffer(color);
                    (console.clone(), make(console))
                },
                |(console, checker), file| check_one(checker, console, file, root),
            )
            .collect()
    } else {
        targets
            .iter()
            .map(|file| check_one(&mut lead, &lead_console, file, root))
            .collect()
    };
    RunReport::new(results, excluded)
}

fn check_one<C: Checker>(checker: &mut C, console: &Console, file: &Path, root: &Path) -> FileReport {
    let outcome = checker.check(file);
    debug!(file = %file.display(), ?outcome, "checked");
    FileReport {
        file: display_path(file, root),
        outcome,
        output: console.take(),
    }
}
