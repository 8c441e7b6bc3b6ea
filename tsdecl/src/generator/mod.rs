//! TypeScript generation.
//!
//! The pieces, leaf first:
//!
//! - [`ident`]: identifier sanitizing, quoting and `rename_all` rules
//! - [`docs`]: JSDoc synthesis from attribute bags
//! - [`builder`]: the indentation-aware [`SourceBuilder`](builder::SourceBuilder)
//! - [`resolver`]: [`Format`](crate::ir::Format) to type expression mapping
//! - [`emitter`]: one declaration to its TypeScript text
//! - [`output`]: per-run state and the output files

pub mod builder;
pub mod config;
pub mod docs;
pub mod emitter;
pub mod ident;
pub mod output;
pub mod resolver;

pub use config::{GeneratorConfig, IndentStyle, UnresolvedPolicy};
pub use output::{generate, run, GeneratedFiles, Generation, Output, OutputFile};
