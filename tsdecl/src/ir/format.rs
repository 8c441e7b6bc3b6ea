//! Format IR definitions.
//!
//! These closed sum types describe the shape of values (`Format`), of named
//! declarations (`ContainerFormat`) and of enum arms (`VariantFormat`). The
//! JSON encoding is serde's externally tagged form, e.g. `"Str"`,
//! `{"Option": "U8"}` or `{"TypeName": {"ident": "User", "generics": []}}`.

use serde::{Deserialize, Serialize};

use super::attrs::{Attrs, LocationId};

/// Recursive description of a value's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Format {
    // ==========================================================================
    // Primitives
    // ==========================================================================
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    #[serde(rename = "ISIZE")]
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    #[serde(rename = "USIZE")]
    Usize,
    F32,
    F64,
    Char,
    Str,
    Bytes,
    Never,

    // ==========================================================================
    // Compound Types
    // ==========================================================================
    /// Optional value
    Option(Box<Format>),

    /// Sequence of values
    Seq(Box<Format>),

    /// Key to value mapping
    Map {
        key: Box<Format>,
        value: Box<Format>,
    },

    /// Fixed-arity heterogeneous tuple
    Tuple(Vec<Format>),

    /// Fixed-length homogeneous array
    TupleArray { content: Box<Format>, size: usize },

    // ==========================================================================
    // References
    // ==========================================================================
    /// Reference to another declaration (or a generic parameter)
    TypeName {
        ident: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generics: Vec<Format>,
    },

    /// Shape the upstream compiler could not resolve
    Incomplete { debug: String },
}

impl Format {
    pub fn option(inner: Format) -> Self {
        Format::Option(Box::new(inner))
    }

    pub fn seq(inner: Format) -> Self {
        Format::Seq(Box::new(inner))
    }

    pub fn map(key: Format, value: Format) -> Self {
        Format::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn tuple_array(content: Format, size: usize) -> Self {
        Format::TupleArray {
            content: Box::new(content),
            size,
        }
    }

    /// Reference a declaration by name, without generic arguments.
    pub fn type_name(ident: impl Into<String>) -> Self {
        Format::TypeName {
            ident: ident.into(),
            generics: Vec::new(),
        }
    }

    /// Reference a generic declaration.
    pub fn generic(ident: impl Into<String>, generics: Vec<Format>) -> Self {
        Format::TypeName {
            ident: ident.into(),
            generics,
        }
    }

    pub fn incomplete(debug: impl Into<String>) -> Self {
        Format::Incomplete {
            debug: debug.into(),
        }
    }
}

/// Shape of a named declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// `struct Empty;`
    UnitStruct,

    /// `struct Name(String);`
    NewTypeStruct(Box<Format>),

    /// `struct Point(f64, f64);`
    TupleStruct(Vec<Format>),

    /// `struct User { .. }`
    Struct { fields: Vec<NamedField> },

    /// `enum Shape { .. }`
    Enum {
        #[serde(default)]
        repr: EnumRepresentation,
        variants: Vec<NamedVariant>,
    },
}

impl ContainerFormat {
    pub fn newtype(inner: Format) -> Self {
        ContainerFormat::NewTypeStruct(Box::new(inner))
    }

    /// Short name of the container kind, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContainerFormat::UnitStruct => "unit struct",
            ContainerFormat::NewTypeStruct(_) => "newtype struct",
            ContainerFormat::TupleStruct(_) => "tuple struct",
            ContainerFormat::Struct { .. } => "struct",
            ContainerFormat::Enum { .. } => "enum",
        }
    }
}

/// Wire representation of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnumRepresentation {
    /// `{ "Variant": payload }`, or `"Variant"` for unit variants
    #[default]
    External,

    /// `#[serde(untagged)]`
    Untagged,

    /// `#[serde(tag = "..")]` / `#[serde(tag = "..", content = "..")]`
    Tagged {
        tag: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

impl EnumRepresentation {
    /// Human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            EnumRepresentation::External => "external".to_string(),
            EnumRepresentation::Untagged => "untagged".to_string(),
            EnumRepresentation::Tagged { tag, content: None } => {
                format!("internally tagged (tag = \"{}\")", tag)
            }
            EnumRepresentation::Tagged {
                tag,
                content: Some(content),
            } => format!(
                "adjacently tagged (tag = \"{}\", content = \"{}\")",
                tag, content
            ),
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    pub id: String,

    #[serde(default)]
    pub id_location: LocationId,

    pub format: Format,

    #[serde(flatten)]
    pub attrs: Attrs,
}

impl NamedField {
    pub fn new(id: impl Into<String>, format: Format) -> Self {
        Self {
            id: id.into(),
            id_location: LocationId::default(),
            format,
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

/// A named enum variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVariant {
    pub id: String,

    #[serde(default)]
    pub id_location: LocationId,

    pub variant_format: VariantFormat,

    #[serde(flatten)]
    pub attrs: Attrs,
}

impl NamedVariant {
    pub fn new(id: impl Into<String>, variant_format: VariantFormat) -> Self {
        Self {
            id: id.into(),
            id_location: LocationId::default(),
            variant_format,
            attrs: Attrs::default(),
        }
    }

    pub fn unit(id: impl Into<String>) -> Self {
        Self::new(id, VariantFormat::Unit)
    }

    pub fn newtype(id: impl Into<String>, inner: Format) -> Self {
        Self::new(id, VariantFormat::NewType(Box::new(inner)))
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Shape of one enum arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariantFormat {
    Unit,
    NewType(Box<Format>),
    Tuple(Vec<Format>),
    Struct { fields: Vec<NamedField> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_primitive_formats() {
        let formats: Vec<Format> =
            serde_json::from_str(r#"["Str", "ISIZE", "USIZE", "Bytes", "Never"]"#).unwrap();
        assert_eq!(
            formats,
            vec![
                Format::Str,
                Format::Isize,
                Format::Usize,
                Format::Bytes,
                Format::Never
            ]
        );
    }

    #[test]
    fn test_deserialize_nested_format() {
        let json = r#"{"Map": {"key": "Str", "value": {"Option": {"Seq": "U8"}}}}"#;
        let format: Format = serde_json::from_str(json).unwrap();
        assert_eq!(
            format,
            Format::map(Format::Str, Format::option(Format::seq(Format::U8)))
        );
    }

    #[test]
    fn test_deserialize_type_name_without_generics() {
        let format: Format = serde_json::from_str(r#"{"TypeName": {"ident": "User"}}"#).unwrap();
        assert_eq!(format, Format::type_name("User"));
    }

    #[test]
    fn test_deserialize_enum_container() {
        let json = r#"{
            "Enum": {
                "repr": {"Tagged": {"tag": "type"}},
                "variants": [
                    {"id": "On", "id_location": "L(a.rs:1:1)", "variant_format": "Unit"},
                    {"id": "Level", "variant_format": {"NewType": "I32"}, "rust_docs": "Brightness"}
                ]
            }
        }"#;
        let container: ContainerFormat = serde_json::from_str(json).unwrap();
        let ContainerFormat::Enum { repr, variants } = container else {
            panic!("expected enum");
        };
        assert_eq!(
            repr,
            EnumRepresentation::Tagged {
                tag: "type".to_string(),
                content: None
            }
        );
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].attrs.rust_docs.as_deref(), Some("Brightness"));
    }

    #[test]
    fn test_enum_repr_defaults_to_external() {
        let json = r#"{"Enum": {"variants": []}}"#;
        let container: ContainerFormat = serde_json::from_str(json).unwrap();
        assert!(matches!(
            container,
            ContainerFormat::Enum {
                repr: EnumRepresentation::External,
                ..
            }
        ));
    }

    #[test]
    fn test_describe_representation() {
        assert_eq!(EnumRepresentation::Untagged.describe(), "untagged");
        let adjacent = EnumRepresentation::Tagged {
            tag: "t".to_string(),
            content: Some("c".to_string()),
        };
        assert_eq!(
            adjacent.describe(),
            "adjacently tagged (tag = \"t\", content = \"c\")"
        );
    }
}
