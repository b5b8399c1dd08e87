//! Error types for configuration loading and engine execution.
//!
//! Lint findings are never errors; they flow through reporters and end up in
//! a `CheckOutcome`. `LintError` covers everything that prevents a check from
//! running at all.

use std::path::PathBuf;
use thiserror::Error;

/// Infrastructure failures raised while loading settings or driving engines.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to start {engine}: {source}")]
    EngineSpawn {
        engine: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{engine} produced unexpected output: {message}")]
    EngineOutput {
        engine: &'static str,
        message: String,
    },

    #[error("no Python files found under {paths}")]
    NoFiles { paths: String },
}

impl LintError {
    /// Process exit status used by the binary for this error.
    ///
    /// - 2: configuration or input problems
    /// - 3: an engine could not be run
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } | Self::ConfigParse { .. } | Self::NoFiles { .. } => 2,
            Self::EngineSpawn { .. } | Self::EngineOutput { .. } => 3,
        }
    }
}
