//! # tsdecl-cli
//!
//! CLI library for generating TypeScript declarations from IR documents.
//!
//! This crate provides the core functionality for the `tsdecl` CLI tool:
//! configuration, reading IR documents and writing generated files.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`input`] - IR document decoding from a file or stdin
//! - [`writer`] - File output, dry-run and drift checks
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod input;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use input::{read_document, InputSource};
pub use writer::{find_drift, Drift, FileWriter};
