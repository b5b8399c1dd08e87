//! Configuration discovery and effective settings resolution.
//!
//! pydevlint reads `pydevlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `checker`: `combined`
//! - `output`: `human`
//! - `python`: `python3`
//! - `lint_config`: first of `setup.cfg`, `tox.ini`, `.flake8` in the root
//! - `paths`: `--repo-root` when given, else `.`
//! - `exclude`: none
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::LintError;
use crate::lint::CheckerKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: &[&str] = &["pydevlint.toml", "pydevlint.yaml", "pydevlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `pydevlint.toml|yaml`.
pub struct ToolConfig {
    pub checker: Option<CheckerKind>,
    pub output: Option<String>,
    pub python: Option<String>,
    /// INI file path, relative to the repository root.
    pub lint_config: Option<String>,
    pub paths: Option<Vec<String>>,
    /// Directory prefixes skipped during discovery, relative to the root.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub checker: CheckerKind,
    pub output: String,
    pub python: String,
    pub lint_config: Option<PathBuf>,
    pub paths: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line.
pub struct Overrides {
    pub repo_root: Option<String>,
    pub checker: Option<CheckerKind>,
    pub output: Option<String>,
    pub python: Option<String>,
    pub lint_config: Option<String>,
    pub paths: Vec<String>,
    pub exclude: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `pydevlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ToolConfig` from `pydevlint.toml` or `pydevlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<ToolConfig>, LintError> {
    let Some(path) = CONFIG_FILES.iter().map(|f| root.join(f)).find(|p| p.exists()) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|source| LintError::Io {
        path: path.clone(),
        source,
    })?;
    let parsed = if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str::<ToolConfig>(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<ToolConfig>(&s).map_err(|e| e.to_string())
    };
    parsed
        .map(Some)
        .map_err(|message| LintError::ConfigParse { path, message })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective, LintError> {
    let start = match &cli.repo_root {
        Some(r) => PathBuf::from(r),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let checker = cli.checker.or(cfg.checker).unwrap_or_default();
    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let python = cli
        .python
        .clone()
        .or(cfg.python)
        .unwrap_or_else(|| "python3".to_string());

    // CLI paths are taken as given; config paths are relative to the root.
    let lint_config = match (&cli.lint_config, cfg.lint_config) {
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(p)) => Some(repo_root.join(p)),
        (None, None) => None,
    };
    let paths = if !cli.paths.is_empty() {
        cli.paths.clone()
    } else {
        match cfg.paths {
            Some(list) if !list.is_empty() => list
                .iter()
                .map(|p| repo_root.join(p).to_string_lossy().to_string())
                .collect(),
            _ => vec![cli.repo_root.clone().unwrap_or_else(|| ".".to_string())],
        }
    };
    let mut exclude: Vec<String> = cfg
        .exclude
        .iter()
        .map(|p| repo_root.join(p).to_string_lossy().to_string())
        .collect();
    exclude.extend(cli.exclude.iter().cloned());

    Ok(Effective {
        repo_root,
        config_found,
        checker,
        output,
        python,
        lint_config,
        paths,
        exclude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> Overrides {
        Overrides {
            repo_root: root.to_str().map(str::to_string),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("pydevlint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
checker = "pyflakes"
output = "json"
lint_config = "tox.ini"
paths = ["src"]
exclude = ["src/gen"]
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(&at(root)).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.checker, CheckerKind::Pyflakes);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.python, "python3");
        assert_eq!(eff.lint_config, Some(root.join("tox.ini")));
        assert_eq!(eff.paths, vec![root.join("src").to_string_lossy().to_string()]);
        assert_eq!(eff.exclude, vec![root.join("src/gen").to_string_lossy().to_string()]);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("pydevlint.yaml"), "python: python3.12\n").unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.python, "python3.12");
        assert_eq!(eff.checker, CheckerKind::Combined);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.lint_config, None);
        assert_eq!(eff.paths, vec![root.to_string_lossy().to_string()]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("pydevlint.toml"), "checker = \"pyflakes\"\noutput = \"json\"\n").unwrap();

        let mut cli = at(root);
        cli.checker = Some(CheckerKind::Flake8);
        cli.paths = vec!["pkg/mod.py".into()];
        cli.exclude = vec!["vendor".into()];
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.checker, CheckerKind::Flake8);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.paths, vec!["pkg/mod.py"]);
        assert_eq!(eff.exclude, vec!["vendor"]);
    }

    #[test]
    fn test_missing_config_and_git_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("pkg/sub")).unwrap();
        assert_eq!(detect_repo_root(&root.join("pkg/sub")), root.to_path_buf());
        assert!(load_config(root).unwrap().is_none());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("pydevlint.toml"), "checker = \"pylint\"\n").unwrap();
        let err = resolve_effective(&at(root)).unwrap_err();
        assert!(matches!(err, LintError::ConfigParse { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
