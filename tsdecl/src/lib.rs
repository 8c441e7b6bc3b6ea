//! # tsdecl
//!
//! Generate TypeScript declarations from a serde-shaped type IR.
//!
//! Each declaration of a [`Document`](ir::Document) becomes a TypeScript
//! type together with a same-named constructor, and externally tagged enums
//! additionally get a namespace with per-variant constructors and exhaustive
//! `apply`/`match` helpers.
//!
//! ## Usage
//!
//! ```rust
//! use tsdecl::ir::{ContainerFormat, Declaration, Document, Format, NamedVariant, EnumRepresentation};
//! use tsdecl::GeneratorConfig;
//!
//! let document = Document::new(vec![Declaration::new(
//!     "Light",
//!     ContainerFormat::Enum {
//!         repr: EnumRepresentation::External,
//!         variants: vec![
//!             NamedVariant::unit("On"),
//!             NamedVariant::newtype("Level", Format::I32),
//!         ],
//!     },
//! )]);
//!
//! let generated = tsdecl::generate(&document, &GeneratorConfig::default()).unwrap();
//! assert_eq!(generated.files[0].path, "types.ts");
//! assert!(generated.files[0].source.contains("export namespace Light {"));
//! ```
//!
//! [`run`] returns the same result as a serializable [`Output`] envelope,
//! with a fatal error reported in `errors` instead of returned.

pub mod error;
pub mod generator;
pub mod ir;

pub use error::{GenerateError, GenerateResult, Message};
pub use generator::{
    generate, run, GeneratedFiles, GeneratorConfig, IndentStyle, Output, OutputFile,
    UnresolvedPolicy,
};
