//! Error types for the CLI.
//!
//! Every failure of a command ends up as a [`CliError`]; `main` maps it to
//! an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error reading or decoding the IR document.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Fatal generation error.
    #[error("Failed to generate declarations: {0}")]
    Generate(#[from] tsdecl::GenerateError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Generated files on disk are out of date.
    #[error("Check failed: {0}")]
    Check(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Check(_) => 2,
            _ => 1,
        }
    }
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Config file already exists and `--force` was not given.
    #[error("Configuration file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error reading or decoding the IR document.
#[derive(Debug, Error)]
pub enum InputError {
    /// IO error reading the document.
    #[error("Failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid IR document.
    #[error("Invalid IR in {source_name} at `{path}`: {message}")]
    Decode {
        source_name: String,
        /// JSON path of the offending value
        path: String,
        message: String,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated path would land outside the output directory.
    #[error("Refusing to write outside the output directory: {path}")]
    OutsideOutputDir { path: String },
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}

impl InputError {
    /// Create a decode error.
    pub fn decode(
        source_name: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            source_name: source_name.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}
