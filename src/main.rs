//! pydevlint CLI binary entry point.
//! Resolves configuration, runs the selected checker and prints results.

use clap::Parser;
use pydevlint::cli::{Cli, Commands};
use pydevlint::config::{self, Overrides};
use pydevlint::error::LintError;
use pydevlint::settings::LintSettings;
use pydevlint::utils::{error_prefix, info_prefix, note_prefix, use_colors};
use pydevlint::{lint, output, paths};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PYDEVLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", error_prefix(), err);
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32, LintError> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Codes { code, output } => {
            let output = output.unwrap_or_else(|| "human".to_string());
            if output::print_codes(code.as_deref(), &output) {
                Ok(0)
            } else {
                eprintln!(
                    "{} unknown code: {}",
                    error_prefix(),
                    code.unwrap_or_default()
                );
                Ok(2)
            }
        }
        Commands::Lint {
            paths,
            repo_root,
            checker,
            lint_config,
            output,
            exclude,
            python,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root,
                checker,
                output,
                python,
                lint_config,
                paths,
                exclude,
            })?;
            // Friendly note if no pydevlint config was found
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} No pydevlint.toml found; using defaults.",
                    note_prefix()
                );
            }
            let settings =
                LintSettings::load(&eff.python, eff.lint_config.as_deref(), &eff.repo_root)?;
            if eff.output != "json" {
                if let Some(cfg) = &settings.lint_config {
                    eprintln!("{} Using lint config: {}", info_prefix(), cfg.display());
                }
            }
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let files = paths::rglob(&eff.paths, &eff.exclude, &cwd);
            if files.is_empty() {
                return Err(LintError::NoFiles {
                    paths: eff.paths.join(", "),
                });
            }
            let report = lint::run_lint(
                &files,
                eff.checker,
                &settings,
                display_root(&eff.repo_root, &cwd),
                use_colors(&eff.output),
            );
            output::print_run(&report, &eff.output);
            Ok(if report.passed() { 0 } else { 1 })
        }
    }
}

/// Report paths relative to the working directory when it lies inside the
/// repository, else relative to the repository root.
fn display_root<'a>(repo_root: &'a Path, cwd: &'a Path) -> &'a Path {
    if cwd.starts_with(repo_root) {
        cwd
    } else {
        repo_root
    }
}
