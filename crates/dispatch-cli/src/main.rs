//! Pipeline dispatch CLI entrypoint.

use clap::Parser;
use dispatch_core::MatcherConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod handlers;
mod manifest;

use commands::Commands;

#[derive(Parser)]
#[command(name = "dispatch")]
#[command(author, version, long_about = None)]
#[command(about = "Route version-control events to pipeline runs")]
struct Cli {
    /// Matcher configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => MatcherConfig::from_file(path)?,
        None => MatcherConfig::default(),
    }
    .apply_env()?;

    match cli.command {
        Commands::Match(args) => handlers::match_event(&config, args).await?,
        Commands::Lint { dir } => handlers::lint(&config, &dir)?,
    }

    Ok(())
}
