//! Assembler error types
//!
//! Validation failures abort a run before anything is written. Per-file read
//! failures never surface here; they are recorded as skipped files instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for assembler operations
pub type AssembleResult<T> = Result<T, AssembleError>;

/// Errors that can occur while assembling a document
#[derive(Error, Debug)]
pub enum AssembleError {
    /// A required metadata field was empty
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Project root does not exist or is not a directory
    #[error("Invalid project directory: {path}")]
    InvalidDirectory { path: PathBuf },

    /// Extension list was empty after parsing
    #[error("At least one file extension is required")]
    NoExtensions,

    /// Walk finished without a single matching file
    #[error("No files matching [{extensions}] found under {root}")]
    NoMatchingFiles { root: PathBuf, extensions: String },

    /// Matching files were found but none contributed a single line
    #[error("No readable source lines under {root}")]
    NoSourceLines { root: PathBuf },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document library failed to serialise the package
    #[error("Package error: {message}")]
    Package { message: String },

    /// Finished package could not be moved over the destination
    #[error("Failed to persist output to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssembleError {
    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an invalid directory error
    pub fn invalid_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDirectory { path: path.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a package error
    pub fn package(message: impl Into<String>) -> Self {
        Self::Package {
            message: message.into(),
        }
    }

    /// Whether the error was raised by input validation (nothing was attempted).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidDirectory { .. }
                | Self::NoExtensions
                | Self::NoMatchingFiles { .. }
                | Self::NoSourceLines { .. }
                | Self::ConfigError { .. }
        )
    }
}
