//! CLI error handling.

use std::io;

use thiserror::Error;

/// CLI error type with typed exit codes
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] assetforge_config::SettingsError),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("task `{task}` failed: {source}")]
    Task {
        task: String,
        #[source]
        source: assetforge_common_core::Error,
    },

    #[error("build failed: {failed} task(s) did not complete")]
    Build { failed: usize },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a task error
    pub fn task(task: impl Into<String>, source: assetforge_common_core::Error) -> Self {
        Self::Task {
            task: task.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Io { .. } => 3,
            Self::Task { .. } | Self::Build { .. } => 4,
            Self::Other(_) => 1,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<assetforge_common_core::Error> for CliError {
    fn from(err: assetforge_common_core::Error) -> Self {
        Self::Other(err.into())
    }
}
