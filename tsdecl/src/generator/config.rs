//! Generator configuration.
//!
//! [`GeneratorConfig`] deserializes from the camelCase option names the IR
//! producer sends (`sharedFileName`, `importScalarsFrom`, ...), and offers
//! builder-style setters for programmatic use.

use serde::{Deserialize, Serialize};

/// Default name of the primary output file.
pub const DEFAULT_SHARED_FILE_NAME: &str = "types.ts";

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Name of the primary output file
    pub shared_file_name: String,

    /// Literal text inserted at the top of the primary file
    pub prepend_text: Option<String>,

    /// Module that declarations marked `scalar` are imported from
    pub import_scalars_from: Option<String>,

    /// Path prefix for source links; `None` disables links
    pub include_locations_relative_to: Option<String>,

    /// What to do with references to unknown declarations
    pub unresolved_references: UnresolvedPolicy,

    /// Indentation style
    pub indent: IndentStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shared_file_name: DEFAULT_SHARED_FILE_NAME.to_string(),
            prepend_text: None,
            import_scalars_from: None,
            include_locations_relative_to: None,
            unresolved_references: UnresolvedPolicy::default(),
            indent: IndentStyle::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary output file name.
    pub fn with_shared_file_name(mut self, name: impl Into<String>) -> Self {
        self.shared_file_name = name.into();
        self
    }

    /// Set text prepended to the primary file.
    pub fn with_prepend_text(mut self, text: impl Into<String>) -> Self {
        self.prepend_text = Some(text.into());
        self
    }

    /// Import scalar declarations from `module`.
    pub fn with_import_scalars_from(mut self, module: impl Into<String>) -> Self {
        self.import_scalars_from = Some(module.into());
        self
    }

    /// Emit source links, prefixing paths with `prefix`.
    pub fn with_locations_relative_to(mut self, prefix: impl Into<String>) -> Self {
        self.include_locations_relative_to = Some(prefix.into());
        self
    }

    /// Set the unresolved reference policy.
    pub fn with_unresolved_references(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_references = policy;
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Module specifier of the primary file, for `export ... from`.
    pub fn shared_module_specifier(&self) -> String {
        let stem = self
            .shared_file_name
            .strip_suffix(".d.ts")
            .or_else(|| self.shared_file_name.strip_suffix(".ts"))
            .unwrap_or(&self.shared_file_name);
        format!("./{}", stem)
    }
}

/// Policy for `TypeName` references that match no declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Abort the run
    #[default]
    Strict,

    /// Emit an `unknown` placeholder carrying the name
    Opaque,
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Use spaces for indentation (default: 2 spaces)
    #[default]
    Spaces2,

    /// Use 4 spaces for indentation
    Spaces4,

    /// Use tabs for indentation
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.shared_file_name, "types.ts");
        assert!(config.prepend_text.is_none());
        assert!(config.import_scalars_from.is_none());
        assert!(config.include_locations_relative_to.is_none());
        assert_eq!(config.unresolved_references, UnresolvedPolicy::Strict);
        assert_eq!(config.indent, IndentStyle::Spaces2);
    }

    #[test]
    fn test_deserialize_camel_case_options() {
        let json = r#"{
            "sharedFileName": "models.ts",
            "importScalarsFrom": "./scalars",
            "includeLocationsRelativeTo": "../",
            "unresolvedReferences": "opaque",
            "indent": "tabs"
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shared_file_name, "models.ts");
        assert_eq!(config.import_scalars_from.as_deref(), Some("./scalars"));
        assert_eq!(config.include_locations_relative_to.as_deref(), Some("../"));
        assert_eq!(config.unresolved_references, UnresolvedPolicy::Opaque);
        assert_eq!(config.indent, IndentStyle::Tabs);
        assert!(config.prepend_text.is_none());
    }

    #[test]
    fn test_builder_setters() {
        let config = GeneratorConfig::new()
            .with_shared_file_name("api.ts")
            .with_prepend_text("// header")
            .with_indent(IndentStyle::Spaces4);
        assert_eq!(config.shared_file_name, "api.ts");
        assert_eq!(config.prepend_text.as_deref(), Some("// header"));
        assert_eq!(config.indent.as_str(), "    ");
    }

    #[test]
    fn test_shared_module_specifier() {
        assert_eq!(GeneratorConfig::new().shared_module_specifier(), "./types");
        assert_eq!(
            GeneratorConfig::new()
                .with_shared_file_name("api.d.ts")
                .shared_module_specifier(),
            "./api"
        );
        assert_eq!(
            GeneratorConfig::new()
                .with_shared_file_name("shared")
                .shared_module_specifier(),
            "./shared"
        );
    }
}
