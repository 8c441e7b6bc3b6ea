//! Document and declaration IR definitions.

use serde::{Deserialize, Serialize};

use super::attrs::{Attrs, LocationId};
use super::format::ContainerFormat;

/// One IR document: everything a single generation run consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub declarations: Vec<Declaration>,
}

impl Document {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }
}

/// A named type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Raw name as written in the source
    pub id: String,

    /// Location of the name
    #[serde(default)]
    pub id_location: LocationId,

    /// Shape of the declaration
    pub container_kind: ContainerFormat,

    /// Docs, generics and attributes
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl Declaration {
    pub fn new(id: impl Into<String>, container_kind: ContainerFormat) -> Self {
        Self {
            id: id.into(),
            id_location: LocationId::default(),
            container_kind,
            attrs: Attrs::default(),
        }
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.id_location = LocationId::new(location);
        self
    }
}
