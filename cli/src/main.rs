use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use command_flags_core::{FlagRegistry, FlagSpec, ParseReport};
use command_flags_world::{DebugFlags, EnvironmentConfig, RegenFlags, WorldFlags};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for reports and listings.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

/// Flag set to parse against.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliFlagSet {
    /// World creation: --seed, --type, --gen, --structures, --dont-adjust-spawn.
    Create,
    /// World regeneration: --seed with an optional value.
    Regen,
    /// Debug dump: --paste, --include-plugin-list.
    Debug,
}

#[derive(Debug, Parser)]
#[command(name = "flag-parse")]
#[command(about = "Parse and complete typed command flags")]
struct Cli {
    /// Environment config (YAML) listing available generators.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Flag set to use.
    #[arg(long, default_value = "create")]
    set: CliFlagSet,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens into flag values. Pass flag tokens after `--`.
    Parse(ParseArgs),
    /// Print completion candidates for the next token.
    Complete(CompleteArgs),
    /// List the flags of the selected set.
    List,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Tokens to parse, already split.
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    /// The token being typed (may be empty or start with '-').
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    partial: String,
    /// Complete tokens before the cursor.
    tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FlagListing<'a> {
    #[serde(flatten)]
    spec: &'a FlagSpec,
    suggestions: Vec<String>,
}

/// Exit code when the input parsed but some flags were rejected.
const EXIT_PARSE_ERRORS: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_registry(cli.set, cli.config.as_deref()).and_then(|registry| {
        match cli.command {
            Command::Parse(args) => run_parse(&registry, args, cli.format),
            Command::Complete(args) => run_complete(&registry, args, cli.format).map(|()| true),
            Command::List => run_list(&registry, cli.format).map(|()| true),
        }
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_PARSE_ERRORS),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(set: CliFlagSet, config: Option<&Path>) -> Result<FlagRegistry, String> {
    let config = match config {
        Some(path) => EnvironmentConfig::load(path)
            .map_err(|e| format!("failed to load config {}: {e}", path.display()))?,
        None => EnvironmentConfig::default(),
    };
    debug!(set = ?set, generators = config.generators.len(), "Building flag registry");

    let registry = match set {
        CliFlagSet::Create => WorldFlags::new(Arc::new(config.environment())).registry(),
        CliFlagSet::Regen => RegenFlags::new().registry(),
        CliFlagSet::Debug => DebugFlags::new().registry(),
    };
    registry.map_err(|e| format!("failed to register flags: {e}"))
}

/// Returns `Ok(false)` when some flags failed to parse.
fn run_parse(
    registry: &FlagRegistry,
    args: ParseArgs,
    format: CliOutputFormat,
) -> Result<bool, String> {
    let result = registry.parse(&args.tokens);
    let report = result.report();

    let rendered = match format {
        CliOutputFormat::Text => format_report_text(&report),
        _ => serialize(&report, format)?,
    };
    print!("{rendered}");

    Ok(result.is_ok())
}

fn run_complete(
    registry: &FlagRegistry,
    args: CompleteArgs,
    format: CliOutputFormat,
) -> Result<(), String> {
    let candidates = registry.complete(&args.tokens, &args.partial);

    let rendered = match format {
        CliOutputFormat::Text => candidates
            .iter()
            .map(|candidate| format!("{candidate}\n"))
            .collect(),
        _ => serialize(&candidates, format)?,
    };
    print!("{rendered}");
    Ok(())
}

fn run_list(registry: &FlagRegistry, format: CliOutputFormat) -> Result<(), String> {
    let listings: Vec<FlagListing<'_>> = registry
        .flags()
        .map(|spec| FlagListing {
            spec,
            suggestions: registry.suggest(&spec.token),
        })
        .collect();

    let rendered = match format {
        CliOutputFormat::Text => format_listing_text(&listings),
        _ => serialize(&listings, format)?,
    };
    print!("{rendered}");
    Ok(())
}

fn serialize<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| json + "\n")
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        CliOutputFormat::Text => Err("text output is not serialized".to_string()),
    }
}

fn format_report_text(report: &ParseReport) -> String {
    let mut out = String::new();
    for (flag, value) in &report.values {
        out.push_str(&format!("{flag} = {value}\n"));
    }
    for err in &report.errors {
        out.push_str(&format!("error: {}: {}\n", err.token, err.message));
    }
    if !report.remaining.is_empty() {
        out.push_str(&format!("remaining: {}\n", report.remaining.join(" ")));
    }
    out
}

fn format_listing_text(listings: &[FlagListing<'_>]) -> String {
    let mut out = String::new();
    for listing in listings {
        let spec = listing.spec;
        out.push_str(&format!(
            "{:<24} {:<9} {}\n",
            spec.tokens().collect::<Vec<_>>().join(", "),
            spec.presence.to_string(),
            spec.name
        ));
    }
    out
}
