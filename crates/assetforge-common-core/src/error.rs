//! Error types for Assetforge.

use std::path::PathBuf;
use thiserror::Error;

/// Stable error code carried by structured error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub const FILE_NOT_FOUND: ErrorCode = ErrorCode("FILE_NOT_FOUND");
    pub const FILE_READ_ERROR: ErrorCode = ErrorCode("FILE_READ_ERROR");
    pub const FILE_WRITE_ERROR: ErrorCode = ErrorCode("FILE_WRITE_ERROR");
    pub const GLOB_ERROR: ErrorCode = ErrorCode("GLOB_ERROR");
    pub const TOOL_FAILED: ErrorCode = ErrorCode("TOOL_FAILED");
    pub const TOOL_NOT_FOUND: ErrorCode = ErrorCode("TOOL_NOT_FOUND");
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// The main error type for Assetforge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error with structured context.
    #[error("{message}")]
    FileSystem {
        code: ErrorCode,
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// External tool invocation failed.
    #[error("{tool}: {message}")]
    Tool {
        code: ErrorCode,
        tool: String,
        message: String,
        stderr: Option<String>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a new generic error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a file-not-found error for the given path.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: format!("file not found: {}", path.display()),
            path: Some(path.to_string_lossy().to_string()),
            source: None,
        }
    }

    /// Create a tool failure error carrying the tool's stderr.
    pub fn tool_failed(
        tool: impl Into<String>,
        message: impl Into<String>,
        stderr: Option<String>,
    ) -> Self {
        Self::Tool {
            code: ErrorCode::TOOL_FAILED,
            tool: tool.into(),
            message: message.into(),
            stderr,
        }
    }

    /// Error code for structured variants, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::FileSystem { code, .. } | Self::Tool { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias using Assetforge's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_carries_path() {
        let err = Error::file_not_found("/missing/file.less");
        match &err {
            Error::FileSystem { code, path, .. } => {
                assert_eq!(*code, ErrorCode::FILE_NOT_FOUND);
                assert_eq!(path.as_deref(), Some("/missing/file.less"));
            }
            _ => panic!("Expected FileSystem error"),
        }
        assert!(err.to_string().contains("/missing/file.less"));
    }

    #[test]
    fn test_tool_failed_display_includes_tool_name() {
        let err = Error::tool_failed("lessc", "exited with status 1", Some("ParseError".into()));
        assert!(err.to_string().starts_with("lessc:"));
        assert_eq!(err.code(), Some(ErrorCode::TOOL_FAILED));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.code().is_none());
    }
}
