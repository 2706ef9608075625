//! CLI command definitions.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Show which pipeline run an event would trigger
    Match(MatchArgs),

    /// Check the routing annotations of every pipeline run
    Lint {
        /// Directory holding the pipeline run manifests
        #[arg(short, long, default_value = ".tekton")]
        dir: PathBuf,
    },
}

#[derive(Args)]
pub struct MatchArgs {
    /// Directory holding the pipeline run manifests
    #[arg(short, long, default_value = ".tekton")]
    pub dir: PathBuf,

    /// Event type (push, pull_request, ...)
    #[arg(short, long)]
    pub event_type: String,

    /// Target branch of the event
    #[arg(short, long)]
    pub base_branch: String,

    /// Source branch of the event
    #[arg(long, default_value = "")]
    pub head_branch: String,

    /// Web URL of the repository
    #[arg(long, default_value = "")]
    pub url: String,

    /// Commit SHA
    #[arg(long, default_value = "")]
    pub sha: String,

    /// YAML list of Repository resources to resolve target namespaces from
    #[arg(short, long)]
    pub repositories: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
