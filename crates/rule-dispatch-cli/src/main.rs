//! rule-dispatch CLI tool.
//!
//! Usage:
//! ```bash
//! rule-dispatch match --path src/api/users.py [--budget 4000]
//! rule-dispatch list-rules
//! rule-dispatch lint
//! rule-dispatch init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod sources;

/// Select the rule files that apply to a path and print their advice
#[derive(Parser)]
#[command(name = "rule-dispatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the advice that applies to a file
    Match {
        /// File path to match (relative to the project root, or absolute)
        #[arg(short, long)]
        path: String,

        /// Maximum payload size
        #[arg(short, long)]
        budget: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: MatchFormat,

        /// Rules directory (overrides `[sources] dir`)
        #[arg(long)]
        rules_dir: Option<PathBuf>,
    },

    /// List loaded rules
    ListRules {
        /// Rules directory (overrides `[sources] dir`)
        #[arg(long)]
        rules_dir: Option<PathBuf>,
    },

    /// Run checks over the loaded rules
    Lint {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific checks (comma-separated names or codes)
        #[arg(long)]
        checks: Option<String>,

        /// Rules directory (overrides `[sources] dir`)
        #[arg(long)]
        rules_dir: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

/// Output format for match results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum MatchFormat {
    /// Payload on stdout, matched ids on stderr.
    #[default]
    Text,
    /// Full match result as JSON on stdout.
    Json,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let project_dir = Path::new(".");
    let source = config_resolver::resolve(project_dir, cli.config.as_deref());

    let result: Result<()> = match cli.command {
        Commands::Match {
            path,
            budget,
            format,
            rules_dir,
        } => commands::dispatch::run(&path, budget, format, rules_dir.as_deref(), &source),
        Commands::ListRules { rules_dir } => commands::list_rules::run(rules_dir.as_deref(), &source),
        Commands::Lint {
            format,
            checks,
            rules_dir,
        } => commands::lint::run(format, checks.as_deref(), rules_dir.as_deref(), &source),
        Commands::Init { force } => commands::init::run(project_dir, force),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(commands::exit_code(&err));
    }
}
