//! # tsdecl
//!
//! CLI tool for generating TypeScript declarations from IR documents.
//!
//! ## Usage
//!
//! ```bash
//! # Generate from a document into ./generated
//! tsdecl generate --input ir.json
//!
//! # Read the document from stdin
//! cat ir.json | tsdecl generate --input - --out-dir ./web/src/types
//!
//! # Print the output envelope as JSON instead of writing files
//! tsdecl generate --input ir.json --json
//!
//! # Dry run to preview changes
//! tsdecl generate --input ir.json --dry-run
//!
//! # Override configured output names and import modules
//! tsdecl generate --input ir.json --shared-file-name api.ts --import-scalars-from ./scalars
//!
//! # Initialize configuration
//! tsdecl init
//!
//! # Fail with exit code 2 when generated files are out of date
//! tsdecl check --input ir.json --out-dir ./generated
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use tsdecl::{GeneratedFiles, Message, Output, UnresolvedPolicy};
use tsdecl_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, CliResult},
    input::{read_document, InputSource},
    writer::{find_drift, Drift, FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "tsdecl")]
#[command(author, version, about = "Generate TypeScript declarations from a type IR", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript files from an IR document
    Generate {
        /// IR document, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output directory for generated TypeScript files
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Print the output envelope as JSON instead of writing files
        #[arg(long)]
        json: bool,

        /// Policy for references to unknown types
        #[arg(long, value_enum)]
        unresolved: Option<UnresolvedArg>,
    },

    /// Initialize a new tsdecl configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "tsdecl.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that generated files are up-to-date
    Check {
        /// IR document, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding the generated files
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Flags overriding `tsdecl.toml` values shared by `generate` and `check`.
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Name of the primary output file
    #[arg(long)]
    shared_file_name: Option<String>,

    /// Module that scalar declarations are imported from
    #[arg(long)]
    import_scalars_from: Option<String>,

    /// Prefix for source links in doc comments
    #[arg(long)]
    locations_relative_to: Option<String>,
}

impl OverrideArgs {
    fn into_cli_args(
        self,
        out_dir: Option<PathBuf>,
        unresolved: Option<UnresolvedPolicy>,
    ) -> CliArgs {
        CliArgs {
            out_dir,
            shared_file_name: self.shared_file_name,
            scalars_from: self.import_scalars_from,
            relative_to: self.locations_relative_to,
            unresolved,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UnresolvedArg {
    Strict,
    Opaque,
}

impl From<UnresolvedArg> for UnresolvedPolicy {
    fn from(arg: UnresolvedArg) -> Self {
        match arg {
            UnresolvedArg::Strict => UnresolvedPolicy::Strict,
            UnresolvedArg::Opaque => UnresolvedPolicy::Opaque,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "tsdecl=debug,tsdecl_cli=debug",
        _ => "tsdecl=trace,tsdecl_cli=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Generate {
            input,
            out_dir,
            config,
            overrides,
            dry_run,
            json,
            unresolved,
        } => {
            let args = overrides.into_cli_args(out_dir, unresolved.map(Into::into));
            let config = load_config(config, &args)?;
            let source = InputSource::from_arg(&input);
            if json {
                cmd_generate_json(&source, &config)
            } else {
                cmd_generate(&source, &config, dry_run)
            }
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            input,
            out_dir,
            config,
            overrides,
        } => {
            let args = overrides.into_cli_args(out_dir, None);
            let config = load_config(config, &args)?;
            cmd_check(&InputSource::from_arg(&input), &config)
        }
    }
}

fn load_config(path: Option<PathBuf>, args: &CliArgs) -> CliResult<Config> {
    let config = ConfigManager::load(path.as_deref())?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Read the document and generate every file.
fn generate_files(source: &InputSource, config: &Config) -> CliResult<GeneratedFiles> {
    let document = read_document(source)?;
    let generated = tsdecl::generate(&document, &config.generator_config())?;
    Ok(generated)
}

/// Generate command implementation.
fn cmd_generate(source: &InputSource, config: &Config, dry_run: bool) -> CliResult<()> {
    eprintln!("{} {}", "Reading".cyan(), source.name());
    let generated = generate_files(source, config)?;
    print_warnings(&generated.warnings);

    let writer = FileWriter::new(dry_run);
    for result in writer.write_all(&config.output.dir, &generated.files)? {
        match result {
            WriteResult::Written { path, bytes } => {
                eprintln!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::DryRun { content, path } => {
                eprintln!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                eprintln!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                eprintln!("{}", "─".repeat(60).dimmed());
            }
        }
    }
    Ok(())
}

/// `generate --json`: the envelope goes to stdout, errors included.
fn cmd_generate_json(source: &InputSource, config: &Config) -> CliResult<()> {
    let document = read_document(source)?;
    let result = tsdecl::generate(&document, &config.generator_config());
    let output = match &result {
        Ok(generated) => Output::from(generated.clone()),
        Err(error) => Output {
            errors: vec![error.to_message()],
            ..Output::default()
        },
    };
    let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
    println!("{}", json);

    result?;
    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    ConfigManager::write_default(&output, force)?;
    eprintln!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );
    Ok(())
}

/// Check command implementation.
fn cmd_check(source: &InputSource, config: &Config) -> CliResult<()> {
    eprintln!("{}", "Checking generated files...".cyan());
    let generated = generate_files(source, config)?;
    print_warnings(&generated.warnings);

    let drift = find_drift(&config.output.dir, &generated.files)?;
    if drift.is_empty() {
        eprintln!("{} Generated files are up-to-date", "✓".green());
        return Ok(());
    }

    for entry in &drift {
        match entry {
            Drift::Missing(path) => eprintln!("  {} {}", "missing".red(), path.display()),
            Drift::Changed(path) => eprintln!("  {} {}", "changed".yellow(), path.display()),
        }
    }
    eprintln!("  Run 'tsdecl generate' to update");
    Err(CliError::Check(format!(
        "{} generated file(s) out of date",
        drift.len()
    )))
}

fn print_warnings(warnings: &[Message]) {
    for warning in warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    if let CliError::Generate(generate) = error {
        let location = generate.location();
        if !location.as_str().is_empty() {
            eprintln!("  at {}", location.display_path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides_of(argv: &[&str]) -> CliArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate {
                out_dir,
                overrides,
                unresolved,
                ..
            } => overrides.into_cli_args(out_dir, unresolved.map(Into::into)),
            Commands::Check {
                out_dir, overrides, ..
            } => overrides.into_cli_args(out_dir, None),
            Commands::Init { .. } => panic!("expected generate or check"),
        }
    }

    #[test]
    fn test_generate_override_flags() {
        let args = overrides_of(&[
            "tsdecl",
            "generate",
            "--out-dir",
            "web/types",
            "--shared-file-name",
            "api.ts",
            "--import-scalars-from",
            "./scalars",
            "--locations-relative-to",
            "../",
            "--unresolved",
            "opaque",
        ]);
        let config = ConfigManager::merge_cli_args(Config::default(), &args);
        assert_eq!(config.output.dir, PathBuf::from("web/types"));
        assert_eq!(config.output.shared_file_name, "api.ts");
        assert_eq!(config.imports.scalars_from.as_deref(), Some("./scalars"));
        assert_eq!(config.locations.relative_to.as_deref(), Some("../"));
        assert_eq!(config.resolve.unresolved, UnresolvedPolicy::Opaque);
    }

    #[test]
    fn test_check_accepts_override_flags() {
        let args = overrides_of(&[
            "tsdecl",
            "check",
            "--input",
            "ir.json",
            "--shared-file-name",
            "api.ts",
            "--import-scalars-from",
            "./scalars",
        ]);
        let generator =
            ConfigManager::merge_cli_args(Config::default(), &args).generator_config();
        assert_eq!(generator.shared_file_name, "api.ts");
        assert_eq!(generator.import_scalars_from.as_deref(), Some("./scalars"));
        assert!(generator.include_locations_relative_to.is_none());
    }

    #[test]
    fn test_overrides_default_to_config_values() {
        let args = overrides_of(&["tsdecl", "generate"]);
        let config = ConfigManager::merge_cli_args(Config::default(), &args);
        assert_eq!(config, Config::default());
    }
}
