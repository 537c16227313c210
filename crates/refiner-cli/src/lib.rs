use anyhow::{Context, Result};
use clap::Parser;
use mermaid_refiner_core::{Refiner, RefinerConfig, RefinerError, RunSummary};
use std::io::{self, Write};
use std::path::PathBuf;

pub const COMPLETION_MESSAGE: &str = "Mermaid formatting complete. Blank files preserved.";

#[derive(Parser)]
#[command(name = "mermaid-refiner")]
#[command(about = "Enforce Mermaid block closure after last arrow in MD files", long_about = None)]
#[command(after_help = "Example: mermaid-refiner ./docs")]
#[command(version)]
struct Cli {
    /// Target directory (default: current)
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// TOML config file (fence, language, arrow, extension, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON instead of the completion message
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || cli.json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<RefinerConfig> {
    match path {
        Some(path) => RefinerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(RefinerConfig::default()),
    }
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary).context("serialize run summary")?;
        print_stdout(&text)
    } else {
        print_stdout(COMPLETION_MESSAGE)
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(cli.config.as_ref())?;
    let refiner = Refiner::new(config).context("Invalid refiner configuration")?;

    match refiner.refine_directory(&cli.directory) {
        Ok(summary) => report(&summary, cli.json),
        Err(RefinerError::MissingDirectory(dir)) => {
            // Soft no-op: nothing processed, nothing to fail on
            log::error!("Error: Directory '{}' does not exist.", dir.display());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
