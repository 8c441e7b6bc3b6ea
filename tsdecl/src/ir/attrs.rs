//! Attribute bag and source locations.
//!
//! Every declaration, field and variant carries an [`Attrs`] bag with the
//! free-text docs, generic parameters, and two independent attribute
//! namespaces: `serde_*` (wire behavior) and `codegen_*` (output shaping).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque source span token produced by the IR compiler.
///
/// The usual encoding is `L(<path>:<line>:<col> #B<start>-B<end>)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// Create a location token from its raw encoding.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rewrite the span encoding into `path:line`.
    ///
    /// Tokens that don't follow the `L(...)` encoding are returned verbatim.
    pub fn display_path(&self) -> String {
        self.parse_span()
            .map(|(path, line)| format!("{}:{}", path, line))
            .unwrap_or_else(|| self.0.clone())
    }

    fn parse_span(&self) -> Option<(&str, &str)> {
        let inner = self.0.strip_prefix("L(")?.strip_suffix(')')?;
        let position = inner.split(" #").next()?;
        let mut parts = position.rsplitn(3, ':');
        let col = parts.next()?;
        let line = parts.next()?;
        let path = parts.next()?;
        let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if path.is_empty() || !is_number(line) || !is_number(col) {
            return None;
        }
        Some((path, line))
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute names recognized by the emitter.
pub mod names {
    /// `#[serde(transparent)]`
    pub const TRANSPARENT: &str = "transparent";
    /// `#[serde(flatten)]`
    pub const FLATTEN: &str = "flatten";
    /// `#[serde(default)]` or `#[serde(default = "path")]`
    pub const DEFAULT: &str = "default";
    /// `#[serde(skip_serializing_if = "path")]`
    pub const SKIP_SERIALIZING_IF: &str = "skip_serializing_if";
    /// `#[serde(rename = "name")]`
    pub const RENAME: &str = "rename";
    /// `#[serde(rename_all = "rule")]`
    pub const RENAME_ALL: &str = "rename_all";
    /// `#[serde(skip)]`
    pub const SKIP: &str = "skip";
    /// `#[codegen(scalar)]`
    pub const SCALAR: &str = "scalar";
    /// `#[codegen(interface)]`
    pub const INTERFACE: &str = "interface";
    /// `#[codegen(template = "name")]`
    pub const TEMPLATE: &str = "template";
    /// `#[codegen(ts_as = "type")]`
    pub const TS_AS: &str = "ts_as";
}

/// Attribute bag shared by declarations, fields and variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attrs {
    /// Free-text documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rust_docs: Option<String>,

    /// Generic parameter names with their locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rust_generics: Option<Vec<(String, LocationId)>>,

    /// Serde key/value attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serde_attrs: Option<BTreeMap<String, (String, LocationId)>>,

    /// Serde presence-only attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serde_flags: Option<BTreeMap<String, LocationId>>,

    /// Codegen key/value attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codegen_attrs: Option<BTreeMap<String, (String, LocationId)>>,

    /// Codegen presence-only attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codegen_flags: Option<BTreeMap<String, LocationId>>,
}

impl Attrs {
    /// Create an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the documentation text.
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.rust_docs = Some(docs.into());
        self
    }

    /// Add a generic parameter.
    pub fn with_generic(mut self, name: impl Into<String>) -> Self {
        self.rust_generics
            .get_or_insert_with(Vec::new)
            .push((name.into(), LocationId::default()));
        self
    }

    /// Add a serde presence-only attribute.
    pub fn with_serde_flag(mut self, name: impl Into<String>) -> Self {
        self.serde_flags
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), LocationId::default());
        self
    }

    /// Add a serde key/value attribute.
    pub fn with_serde_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.serde_attrs
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), (value.into(), LocationId::default()));
        self
    }

    /// Add a codegen presence-only attribute.
    pub fn with_codegen_flag(mut self, name: impl Into<String>) -> Self {
        self.codegen_flags
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), LocationId::default());
        self
    }

    /// Add a codegen key/value attribute.
    pub fn with_codegen_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.codegen_attrs
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), (value.into(), LocationId::default()));
        self
    }

    pub fn serde_flag(&self, name: &str) -> bool {
        self.serde_flags
            .as_ref()
            .is_some_and(|flags| flags.contains_key(name))
    }

    pub fn serde_attr(&self, name: &str) -> Option<&str> {
        self.serde_attrs
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(|(value, _)| value.as_str())
    }

    pub fn codegen_flag(&self, name: &str) -> bool {
        self.codegen_flags
            .as_ref()
            .is_some_and(|flags| flags.contains_key(name))
    }

    pub fn codegen_attr(&self, name: &str) -> Option<&str> {
        self.codegen_attrs
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(|(value, _)| value.as_str())
    }

    /// Location of the `serde` attribute `name`, flag or key/value.
    pub fn serde_location(&self, name: &str) -> Option<&LocationId> {
        self.serde_flags
            .as_ref()
            .and_then(|flags| flags.get(name))
            .or_else(|| {
                self.serde_attrs
                    .as_ref()
                    .and_then(|attrs| attrs.get(name))
                    .map(|(_, location)| location)
            })
    }

    /// Location of the `codegen` attribute `name`, flag or key/value.
    pub fn codegen_location(&self, name: &str) -> Option<&LocationId> {
        self.codegen_flags
            .as_ref()
            .and_then(|flags| flags.get(name))
            .or_else(|| {
                self.codegen_attrs
                    .as_ref()
                    .and_then(|attrs| attrs.get(name))
                    .map(|(_, location)| location)
            })
    }

    /// Whether `default` is present either as a flag or with a path.
    pub fn has_serde_default(&self) -> bool {
        self.serde_flag(names::DEFAULT) || self.serde_attr(names::DEFAULT).is_some()
    }

    /// Generic parameter names in declaration order.
    pub fn generic_names(&self) -> Vec<&str> {
        self.rust_generics
            .iter()
            .flatten()
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
