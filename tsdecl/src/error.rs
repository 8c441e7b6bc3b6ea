//! Error and diagnostic types for code generation.
//!
//! Fatal problems are [`GenerateError`]s and abort the whole run. Problems
//! the run recovers from are reported as [`Message`]s in the output's
//! `warnings` list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ir::LocationId;

/// Result type alias for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Fatal generation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// Enum uses a wire representation the emitter does not implement.
    #[error("enum '{id}' uses the {repr} representation; only externally tagged enums are supported")]
    UnsupportedRepresentation {
        id: String,
        location: LocationId,
        repr: String,
    },

    /// A `TypeName` does not name any declaration of this run.
    #[error("'{declaration}' references unknown type '{ident}'")]
    UnresolvedReference {
        declaration: String,
        ident: String,
        location: LocationId,
    },

    /// Two variants of one enum share a discriminant.
    #[error("enum '{id}' has more than one variant named \"{discriminant}\"")]
    DuplicateVariant {
        id: String,
        discriminant: String,
        location: LocationId,
    },

    /// A variant's identifier clashes with another member of the enum's
    /// namespace.
    #[error("enum '{id}': variant '{variant}' is emitted as `{name}`, which is already {conflict}")]
    VariantNameCollision {
        id: String,
        variant: String,
        name: String,
        conflict: String,
        location: LocationId,
    },

    /// The emitter misused the text builder.
    #[error("internal emitter error in '{id}': {source}")]
    Builder {
        id: String,
        location: LocationId,
        #[source]
        source: BuilderError,
    },
}

impl GenerateError {
    /// Source location of the offending declaration, field or variant.
    pub fn location(&self) -> &LocationId {
        match self {
            GenerateError::UnsupportedRepresentation { location, .. }
            | GenerateError::UnresolvedReference { location, .. }
            | GenerateError::DuplicateVariant { location, .. }
            | GenerateError::VariantNameCollision { location, .. }
            | GenerateError::Builder { location, .. } => location,
        }
    }

    /// Convert to a diagnostic for the output envelope.
    pub fn to_message(&self) -> Message {
        let label = match self {
            GenerateError::UnsupportedRepresentation { .. } => "unsupported representation",
            GenerateError::UnresolvedReference { .. } => "referenced here",
            GenerateError::DuplicateVariant { .. } => "duplicate variant",
            GenerateError::VariantNameCollision { .. } => "conflicting variant",
            GenerateError::Builder { .. } => "while emitting",
        };
        Message::new(self.to_string()).with_label(label, self.location().clone())
    }
}

/// Misuse of the [`SourceBuilder`](crate::generator::builder::SourceBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// The most recent entry is a nested scope, not a line.
    #[error("the last entry is a nested scope, not a line")]
    LastIsScope,

    /// Nothing has been appended yet.
    #[error("no line has been appended yet")]
    Empty,
}

/// A diagnostic message with labelled source locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<(String, LocationId)>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Attach a labelled location.
    pub fn with_label(mut self, label: impl Into<String>, location: LocationId) -> Self {
        self.labels.push((label.into(), location));
        self
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for (label, location) in &self.labels {
            write!(f, "\n  {}: {}", label, location.display_path())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_representation_message() {
        let error = GenerateError::UnsupportedRepresentation {
            id: "Shape".to_string(),
            location: LocationId::new("L(src/shape.rs:3:10 #B1-B2)"),
            repr: "untagged".to_string(),
        };
        let message = error.to_message();
        assert!(message.message.contains("'Shape'"));
        assert!(message.message.contains("untagged"));
        assert_eq!(message.labels.len(), 1);
        assert_eq!(message.labels[0].1.display_path(), "src/shape.rs:3");
    }

    #[test]
    fn test_builder_error_keeps_source() {
        let error = GenerateError::Builder {
            id: "User".to_string(),
            location: LocationId::default(),
            source: BuilderError::LastIsScope,
        };
        assert!(error.to_string().contains("nested scope"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_message_display_lists_labels() {
        let message = Message::new("duplicate declaration 'A'")
            .with_label("first declared here", LocationId::new("L(a.rs:1:1)"))
            .with_label("skipped", LocationId::new("L(b.rs:2:1)"));
        assert_eq!(
            message.to_string(),
            "duplicate declaration 'A'\n  first declared here: a.rs:1\n  skipped: b.rs:2"
        );
    }
}
