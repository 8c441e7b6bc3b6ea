//! Integration tests for tsdecl-cli.
//!
//! These tests verify end-to-end functionality of the CLI library,
//! from configuration and IR input to written and checked files.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use tsdecl_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, ConfigError, InputError},
    find_drift, read_document, Drift, FileWriter, InputSource,
};

/// Get the path to test fixtures.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn models() -> InputSource {
    InputSource::File(fixtures_path().join("models.json"))
}

fn generate(config: &Config) -> tsdecl::GeneratedFiles {
    let document = read_document(&models()).unwrap();
    tsdecl::generate(&document, &config.generator_config()).unwrap()
}

// =============================================================================
// Input
// =============================================================================

#[test]
fn test_reads_fixture_document() {
    let document = read_document(&models()).unwrap();
    let ids: Vec<&str> = document.declarations.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["User", "UserId", "Status"]);
}

#[test]
fn test_invalid_document_reports_json_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"declarations": [{"id": "A", "container_kind": {"NewTypeStruct": "Text"}}]}"#,
    )
    .unwrap();

    let error = read_document(&InputSource::File(path)).unwrap_err();
    match error {
        CliError::Input(InputError::Decode { path, .. }) => {
            assert!(path.starts_with("declarations[0]"), "path was {}", path);
        }
        other => panic!("unexpected error: {}", other),
    }
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_end_to_end_generation() {
    let out = TempDir::new().unwrap();
    let config = ConfigManager::merge_cli_args(
        Config::default(),
        &CliArgs {
            out_dir: Some(out.path().to_path_buf()),
            ..Default::default()
        },
    );

    let generated = generate(&config);
    let results = FileWriter::new(false)
        .write_all(&config.output.dir, &generated.files)
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.was_written()));

    let types = fs::read_to_string(out.path().join("types.ts")).unwrap();
    assert!(types.contains("export type User = {\n  id: UserId;\n  name: string;\n  email?: string | undefined | null;\n};"));
    assert!(types.contains("export type UserId = number;"));
    assert!(types.contains("export namespace Status {"));

    let template = fs::read_to_string(out.path().join("forms.User.ts")).unwrap();
    assert_eq!(template, "export { User } from \"./types\";\n");
}

#[test]
fn test_dry_run_writes_nothing() {
    let out = TempDir::new().unwrap();
    let generated = generate(&Config::default());
    let results = FileWriter::new(true)
        .write_all(out.path(), &generated.files)
        .unwrap();
    assert!(results.iter().all(|r| !r.was_written()));
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn test_config_file_shapes_output() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tsdecl.toml");
    fs::write(
        &config_path,
        r#"
[output]
shared_file_name = "api.ts"
prepend_text = "// generated by tsdecl"

[locations]
relative_to = "../"

[format]
indent = "spaces4"
"#,
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_path)).unwrap();
    let generated = generate(&config);
    assert_eq!(generated.files[0].path, "api.ts");
    assert_eq!(generated.files[1].source, "export { User } from \"./api\";\n");

    let source = &generated.files[0].source;
    assert!(source.starts_with("// generated by tsdecl\n\n"));
    assert!(source.contains(" * ../src/models.rs:4\n"));
    assert!(source.contains("\n    name: string;\n"));
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsdecl.toml");

    ConfigManager::write_default(&path, false).unwrap();
    let config = ConfigManager::load(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_init_does_not_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tsdecl.toml");
    fs::write(&path, "# mine\n").unwrap();

    let result = ConfigManager::write_default(&path, false);
    assert!(matches!(
        result,
        Err(CliError::Config(ConfigError::AlreadyExists { .. }))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    ConfigManager::write_default(&path, true).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("[output]"));
}

// =============================================================================
// Check
// =============================================================================

#[test]
fn test_check_passes_for_fresh_files() {
    let out = TempDir::new().unwrap();
    let generated = generate(&Config::default());
    FileWriter::new(false)
        .write_all(out.path(), &generated.files)
        .unwrap();

    assert!(find_drift(out.path(), &generated.files).unwrap().is_empty());
}

#[test]
fn test_check_detects_stale_and_missing_files() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("types.ts"), "export {};\n").unwrap();

    let generated = generate(&Config::default());
    let drift = find_drift(out.path(), &generated.files).unwrap();
    assert_eq!(
        drift,
        vec![
            Drift::Changed(out.path().join("types.ts")),
            Drift::Missing(out.path().join("forms.User.ts")),
        ]
    );
    assert_eq!(CliError::Check("stale".to_string()).exit_code(), 2);
}
