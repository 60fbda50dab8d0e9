//! `varsheet` - generate CSS from a design-token snapshot.
//!
//! ```text
//! varsheet generate tokens.json --kind cssvariables --output tokens.css
//! varsheet kinds
//! ```
//!
//! Recovered per-token issues are printed to stderr; fatal errors exit with a
//! non-zero status. Logging goes to stderr. `-v` turns on debug output;
//! otherwise `RUST_LOG` is used when set, and only warnings are shown when it
//! is not.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use varsheet::{
    CodegenRequest, Generation, Generator, GeneratorConfig, MemoryStore, OutputKind, Snapshot,
};

/// Resolve design tokens into themed CSS custom properties
#[derive(Parser, Debug)]
#[command(name = "varsheet")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate code from a token snapshot
    Generate(GenerateArgs),

    /// List the supported output kinds
    Kinds,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Snapshot exported from the host document (.json, .yaml or .yml)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Output kind
    #[arg(short, long, default_value = "cssvariables")]
    kind: String,

    /// Generator configuration (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the code here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fail if a node-reading kind runs on a snapshot without a node
    #[arg(long)]
    node_required: bool,
}

/// Log filter directives: `-v`, then `RUST_LOG`, then warnings only.
fn filter_directives(verbose: bool, rust_log: Option<String>) -> String {
    match rust_log {
        _ if verbose => "debug".to_string(),
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => "warn".to_string(),
    }
}

fn init_tracing(verbose: bool) {
    let directives = filter_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn generate(args: &GenerateArgs) -> Result<Generation> {
    let kind: OutputKind = args.kind.parse()?;

    let snapshot = Snapshot::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    if args.node_required && kind.uses_node() && snapshot.node.is_none() {
        bail!(
            "Output kind '{}' needs a selected node, but {} has none",
            kind,
            args.snapshot.display()
        );
    }

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    tracing::debug!(
        snapshot = %args.snapshot.display(),
        tokens = snapshot.tokens.len(),
        collections = snapshot.collections.len(),
        "snapshot loaded"
    );

    let request = CodegenRequest::from_snapshot(kind, &snapshot);
    let generator = Generator::with_config(MemoryStore::from_snapshot(&snapshot), config);
    let generation = generator
        .generate(&request)
        .await
        .with_context(|| format!("Failed to generate '{}'", kind))?;
    Ok(generation)
}

fn write_code(generation: &Generation, output: Option<&PathBuf>) -> Result<()> {
    let code: String = generation
        .results
        .iter()
        .map(|result| result.code.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    match output {
        Some(path) => fs::write(path, &code)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", code),
    }
    Ok(())
}

fn report_issues(generation: &Generation) {
    for issue in &generation.issues {
        eprintln!("issue: {}", issue);
    }
    if !generation.issues.is_empty() {
        eprintln!("{} token(s) skipped", generation.issues.len());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Kinds => {
            for kind in OutputKind::ALL {
                println!("{}\t{}", kind, kind.language());
            }
        }
        Command::Generate(args) => {
            let generation = generate(&args).await?;
            report_issues(&generation);
            write_code(&generation, args.output.as_ref())?;
        }
    }
    Ok(())
}
