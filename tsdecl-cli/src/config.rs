//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `tsdecl.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tsdecl::generator::config::DEFAULT_SHARED_FILE_NAME;
use tsdecl::{GeneratorConfig, IndentStyle, UnresolvedPolicy};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "tsdecl.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Scalar imports.
    pub imports: ImportsConfig,

    /// Source links in doc comments.
    pub locations: LocationsConfig,

    /// Reference resolution.
    pub resolve: ResolveConfig,

    /// Formatting.
    pub format: FormatConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Name of the primary output file.
    pub shared_file_name: String,

    /// Text inserted at the top of the primary file.
    pub prepend_text: Option<String>,
}

/// Scalar import configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportsConfig {
    /// Module that `scalar` declarations are imported from.
    pub scalars_from: Option<String>,
}

/// Source link configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationsConfig {
    /// Prefix for source paths; links are omitted when unset.
    pub relative_to: Option<String>,
}

/// Reference resolution configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// `strict` or `opaque`.
    pub unresolved: UnresolvedPolicy,
}

/// Formatting configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// `spaces2`, `spaces4` or `tabs`.
    pub indent: IndentStyle,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            shared_file_name: DEFAULT_SHARED_FILE_NAME.to_string(),
            prepend_text: None,
        }
    }
}

impl Config {
    /// Library options for this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            shared_file_name: self.output.shared_file_name.clone(),
            prepend_text: self.output.prepend_text.clone(),
            import_scalars_from: self.imports.scalars_from.clone(),
            include_locations_relative_to: self.locations.relative_to.clone(),
            unresolved_references: self.resolve.unresolved,
            indent: self.format.indent,
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path, `tsdecl.toml` in the working directory is used when
    /// it exists and the defaults otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content, config_path)
    }

    /// Parse configuration text read from `path`.
    pub fn parse(content: &str, path: PathBuf) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path, e.to_string()))?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref out_dir) = args.out_dir {
            config.output.dir = out_dir.clone();
        }

        if let Some(ref name) = args.shared_file_name {
            config.output.shared_file_name = name.clone();
        }

        if let Some(ref module) = args.scalars_from {
            config.imports.scalars_from = Some(module.clone());
        }

        if let Some(ref prefix) = args.relative_to {
            config.locations.relative_to = Some(prefix.clone());
        }

        if let Some(unresolved) = args.unresolved {
            config.resolve.unresolved = unresolved;
        }

        config
    }

    /// Write the default configuration file to `path`.
    pub fn write_default(path: &Path, force: bool) -> CliResult<()> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        std::fs::write(path, Self::default_config_content())?;
        Ok(())
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# tsdecl configuration file

[output]
# Output directory for generated TypeScript files
dir = "./generated"

# Name of the primary output file; template bindings are written next to it
shared_file_name = "types.ts"

# Text inserted at the top of the primary file
# prepend_text = "/* eslint-disable */"

[imports]
# Module that declarations marked #[codegen(scalar)] are imported from
# scalars_from = "./scalars"

[locations]
# Prefix for source links in doc comments; links are omitted when unset
# relative_to = "../"

[resolve]
# What to do with references to types outside the document: "strict" fails,
# "opaque" emits `unknown`
unresolved = "strict"

[format]
# Indentation: "spaces2", "spaces4" or "tabs"
indent = "spaces2"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub out_dir: Option<PathBuf>,

    /// Primary file name override.
    pub shared_file_name: Option<String>,

    /// Scalar import module override.
    pub scalars_from: Option<String>,

    /// Source link prefix override.
    pub relative_to: Option<String>,

    /// Unresolved reference policy override.
    pub unresolved: Option<UnresolvedPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.output.shared_file_name, "types.ts");
        assert!(config.output.prepend_text.is_none());
        assert!(config.imports.scalars_from.is_none());
        assert!(config.locations.relative_to.is_none());
        assert_eq!(config.resolve.unresolved, UnresolvedPolicy::Strict);
        assert_eq!(config.format.indent, IndentStyle::Spaces2);
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_cli_args_output() {
        let config = Config::default();
        let args = CliArgs {
            out_dir: Some(PathBuf::from("./custom")),
            unresolved: Some(UnresolvedPolicy::Opaque),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.resolve.unresolved, UnresolvedPolicy::Opaque);
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged, config);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[output]
dir = "./web/src/generated"
shared_file_name = "models.ts"
prepend_text = "// @ts-nocheck"

[imports]
scalars_from = "./scalars"

[locations]
relative_to = "../../"

[resolve]
unresolved = "opaque"

[format]
indent = "tabs"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./web/src/generated"));
        let generator = config.generator_config();
        assert_eq!(generator.shared_file_name, "models.ts");
        assert_eq!(generator.prepend_text.as_deref(), Some("// @ts-nocheck"));
        assert_eq!(generator.import_scalars_from.as_deref(), Some("./scalars"));
        assert_eq!(
            generator.include_locations_relative_to.as_deref(),
            Some("../../")
        );
        assert_eq!(generator.unresolved_references, UnresolvedPolicy::Opaque);
        assert_eq!(generator.indent, IndentStyle::Tabs);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = ConfigManager::parse("[output]\nfile = \"x.ts\"\n", PathBuf::from("tsdecl.toml"));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::InvalidToml { .. }))
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/tsdecl.toml")));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::NotFound { .. }))
        ));
    }
}
