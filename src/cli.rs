//! CLI argument parsing via `clap`.

use crate::lint::CheckerKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pydevlint",
    version,
    about = "Run pyflakes, pycodestyle and flake8 with uniform reporting",
    long_about = "pydevlint — drive Python lint engines file by file and report their findings in one consistent format.\n\nConfiguration precedence: CLI > pydevlint.toml > defaults. Engine options come from setup.cfg, tox.ini or .flake8.",
    after_help = "Examples:\n  pydevlint lint src tests\n  pydevlint lint --checker flake8 --output json\n  pydevlint codes F401",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current pydevlint version.")]
    Version,
    /// Lint Python files
    #[command(
        about = "Run lint checks",
        long_about = "Check every *.py file under PATHS with the selected checker. Exits 1 when any file fails.",
        after_help = "Examples:\n  pydevlint lint\n  pydevlint lint pkg --checker pyflakes\n  pydevlint lint --lint-config tox.ini --exclude build"
    )]
    Lint {
        #[arg(help = "Files or directories to check (default: paths from config, else .)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_enum, help = "Checker to run (default: combined)")]
        checker: Option<CheckerKind>,
        #[arg(long, help = "INI file with [flake8]/[pycodestyle] sections (default: setup.cfg, tox.ini or .flake8)")]
        lint_config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Directory prefix to skip during discovery (repeatable)")]
        exclude: Vec<String>,
        #[arg(long, help = "Python interpreter used to run the engines (default: python3)")]
        python: Option<String>,
    },
    /// Show the numeric code table
    #[command(
        about = "Show code translations",
        long_about = "Print the mapping from pyflakes numeric codes to category names, or the entry for one code."
    )]
    Codes {
        #[arg(help = "Single code to look up, e.g. F401")]
        code: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lint_flags() {
        let cli = Cli::try_parse_from([
            "pydevlint",
            "lint",
            "src",
            "tests",
            "--checker",
            "flake8",
            "--exclude",
            "build",
            "--exclude",
            "dist",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Lint {
                paths,
                checker,
                exclude,
                ..
            } => {
                assert_eq!(paths, vec!["src", "tests"]);
                assert_eq!(checker, Some(CheckerKind::Flake8));
                assert_eq!(exclude, vec!["build", "dist"]);
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_unknown_checker_rejected() {
        assert!(Cli::try_parse_from(["pydevlint", "lint", "--checker", "pylint"]).is_err());
    }
}
