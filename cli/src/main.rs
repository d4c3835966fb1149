//! `pip-header`: inspect the command recorded in pip-compile lockfile headers.
//!
//! Reads a lockfile, validates its header with [`pip_header_core`], and
//! prints the recovered arguments, the re-run command line, or the option
//! allow-list. Logs go to stderr; `RUST_LOG` overrides `--verbose`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pip_header_core::{
    ALLOWED_OPTIONS, DISALLOWED_OPTIONS, HeaderPolicy, OptionSpec, PipCompileArgs,
    extract_header_command_with_policy,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output encodings for structured results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "pip-header")]
#[command(about = "Inspect the command recorded in pip-compile lockfile headers")]
struct Cli {
    /// Log extraction steps to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract and validate the header command of a lockfile.
    Extract(ExtractArgs),
    /// Print the command line that regenerates a lockfile.
    Command(CommandArgs),
    /// List the options accepted in a header.
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Lockfile to read, e.g. requirements.txt.
    lockfile: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: CliOutputFormat,
    /// YAML policy file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CommandArgs {
    /// Lockfile to read, e.g. requirements.txt.
    lockfile: PathBuf,
    /// YAML policy file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct OptionsArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Serialize)]
struct OptionListing {
    allowed: &'static [OptionSpec],
    disallowed: &'static [&'static str],
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Command(args) => run_command(args),
        Command::Options(args) => run_options(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn run_extract(args: ExtractArgs) -> Result<(), String> {
    let policy = load_policy(args.config.as_deref())?;
    let parsed = extract_from_file(&args.lockfile, &policy)?;
    print_structured(&parsed, args.format)
}

fn run_command(args: CommandArgs) -> Result<(), String> {
    let policy = load_policy(args.config.as_deref())?;
    let parsed = extract_from_file(&args.lockfile, &policy)?;
    println!("{}", parsed.to_command_line());
    Ok(())
}

fn run_options(args: OptionsArgs) -> Result<(), String> {
    let listing = OptionListing {
        allowed: ALLOWED_OPTIONS,
        disallowed: DISALLOWED_OPTIONS,
    };
    print_structured(&listing, args.format)
}

fn load_policy(path: Option<&Path>) -> Result<HeaderPolicy, String> {
    match path {
        Some(path) => HeaderPolicy::load(path)
            .map_err(|err| format!("Failed to load policy '{}': {err}", path.display())),
        None => Ok(HeaderPolicy::default()),
    }
}

fn extract_from_file(lockfile: &Path, policy: &HeaderPolicy) -> Result<PipCompileArgs, String> {
    let content = fs::read_to_string(lockfile)
        .map_err(|err| format!("Failed to read '{}': {err}", lockfile.display()))?;
    // The core matches `--output-file` against trailing path components, so
    // the path is passed as typed, absolute or relative.
    let lockfile_path = lockfile.to_string_lossy();
    debug!(lockfile = %lockfile.display(), "extracting header command");

    extract_header_command_with_policy(&content, &lockfile_path, policy)
        .map_err(|err| format!("{}: {err}", lockfile.display()))
}

fn print_structured<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize JSON: {err}"))?,
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|err| format!("Failed to serialize YAML: {err}"))?
        }
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
