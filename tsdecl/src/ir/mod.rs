//! Intermediate Representation (IR) module.
//!
//! This module defines the language-neutral data structures produced by the
//! external schema compiler. The IR is consumed as-is by the generator; it is
//! never mutated.

pub mod attrs;
pub mod document;
pub mod format;

pub use attrs::{names, Attrs, LocationId};
pub use document::{Declaration, Document};
pub use format::{
    ContainerFormat, EnumRepresentation, Format, NamedField, NamedVariant, VariantFormat,
};
