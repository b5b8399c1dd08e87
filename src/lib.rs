//! pydevlint core library.
//!
//! Adapters that drive external Python lint engines one file at a time and
//! turn what they report into uniform console output plus a pass/fail
//! outcome per file.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Tool config discovery and effective configuration resolution.
//! - `settings` / `ini`: engine options from `setup.cfg`, `tox.ini`, `.flake8`.
//! - `codes`: numeric code table and message classification.
//! - `filter`: ignore sets and select/ignore prefix policies.
//! - `reporter`: sinks that filter, count and render engine events.
//! - `engine`: subprocess adapters for pyflakes, pycodestyle and flake8.
//! - `lint`: checker invokers and the parallel runner.
//! - `models`: diagnostics, outcomes and run reports.
//! - `output`: Human/JSON printers.
//! - `paths`: file discovery and exclusion matching.
//! - `console`, `error`, `utils`: supporting pieces.
pub mod cli;
pub mod codes;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod filter;
pub mod ini;
pub mod lint;
pub mod models;
pub mod output;
pub mod paths;
pub mod reporter;
pub mod settings;
pub mod utils;
