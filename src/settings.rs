//! Checker settings resolved from the shared INI lint configuration.
//!
//! One [`LintSettings`] is built per run and handed (read-only) to every
//! invoker. Section lookup:
//! - semantic ignore set: `[flake8] ignore` + `extend-ignore` (only `F`
//!   codes, translated to category names) and `[pyflakes] ignore`
//!   (category names, verbatim);
//! - style options: first of `[pycodestyle]`, `[pep8]`, `[flake8]`;
//! - plugin framework: `[flake8]` only.

use crate::error::LintError;
use crate::filter::{ignore_from_list, CodeFilter, PrefixPolicy};
use crate::ini::{split_list, IniFile};
use crate::paths::{Exclusions, DEFAULT_EXCLUDE};
use crate::reporter::guide::CATEGORY_FORMAT;
use crate::reporter::style::{resolve_format, DEFAULT_FORMAT};
use crate::reporter::StyleOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

const STYLE_SECTIONS: &[&str] = &["pycodestyle", "pep8", "flake8"];

#[derive(Debug, Clone)]
/// Resolved settings shared by all invokers.
pub struct LintSettings {
    pub python: String,
    pub lint_config: Option<PathBuf>,
    pub semantic_ignore: CodeFilter,
    pub style: StyleOptions,
    pub flake8_policy: PrefixPolicy,
    pub flake8_format: String,
    pub flake8_disable_noqa: bool,
    pub exclusions: Exclusions,
}

impl LintSettings {
    /// Load `lint_config` (or discover one under `dir`) and resolve settings.
    pub fn load(python: &str, lint_config: Option<&Path>, dir: &Path) -> Result<Self, LintError> {
        let path = match lint_config {
            Some(p) => Some(p.to_path_buf()),
            None => IniFile::discover(dir),
        };
        let ini = match path {
            Some(p) => Some(IniFile::load(&p)?),
            None => None,
        };
        if let Some(ini) = &ini {
            debug!(config = %ini.path().display(), "loaded lint configuration");
        }
        let mut settings = Self::from_ini(python, ini.as_ref(), dir);
        if let Ok(cwd) = std::env::current_dir() {
            settings.exclusions = settings.exclusions.with_cwd(&cwd);
        }
        Ok(settings)
    }

    /// Resolve settings from an already parsed file. `dir` anchors exclude
    /// patterns when no file is given.
    pub fn from_ini(python: &str, ini: Option<&IniFile>, dir: &Path) -> Self {
        let Some(ini) = ini else {
            return Self {
                python: python.to_string(),
                lint_config: None,
                semantic_ignore: CodeFilter::default(),
                style: StyleOptions::default(),
                flake8_policy: PrefixPolicy::explicit(&[], &[]),
                flake8_format: CATEGORY_FORMAT.to_string(),
                flake8_disable_noqa: false,
                exclusions: Exclusions::defaults(dir),
            };
        };

        let mut flake_ignore = ini.get_list("flake8", "ignore");
        flake_ignore.extend(ini.get_list("flake8", "extend-ignore"));
        let mut semantic_ignore = CodeFilter::new(ignore_from_list(&flake_ignore, Some('F')), true);
        semantic_ignore.extend(ini.get_list("pyflakes", "ignore"), false);

        let style_list = |key: &str| {
            ini.get_first(STYLE_SECTIONS, key)
                .map(split_list)
                .unwrap_or_default()
        };
        let max_line_length = ini
            .get_first(STYLE_SECTIONS, "max-line-length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(79);
        let style = StyleOptions {
            policy: PrefixPolicy::new(&style_list("select"), &style_list("ignore")),
            format: ini
                .get_first(STYLE_SECTIONS, "format")
                .map(resolve_format)
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            max_line_length,
            ..StyleOptions::default()
        };

        let base = ini
            .path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(dir);
        let mut exclude = match ini.get_first(STYLE_SECTIONS, "exclude") {
            Some(v) => split_list(v),
            None => DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        };
        exclude.extend(ini.get_list("flake8", "extend-exclude"));

        Self {
            python: python.to_string(),
            lint_config: Some(ini.path().to_path_buf()),
            semantic_ignore,
            style,
            flake8_policy: PrefixPolicy::explicit(
                &ini.get_list("flake8", "select"),
                &flake_ignore,
            ),
            flake8_format: ini
                .get("flake8", "format")
                .map(resolve_format)
                .unwrap_or_else(|| CATEGORY_FORMAT.to_string()),
            flake8_disable_noqa: ini
                .get("flake8", "disable-noqa")
                .map(parse_bool)
                .unwrap_or(false),
            exclusions: Exclusions::new(&exclude, base),
        }
    }
}

/// configparser boolean values.
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "yes" | "true" | "on"
    )
}
