//! Command-line interface for repo-digest
//!
//! Provides `digest`, `classify`, `languages`, `clear-cache` and `completions`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cache;
mod classify;
mod digest;
mod languages;

/// Turn a git repository into a budgeted, prompt-ready digest
#[derive(Parser)]
#[command(name = "repo-digest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository (or read a local directory) and emit its digest
    Digest(Box<digest::DigestArgs>),

    /// Show how each file in a directory is classified and ordered
    Classify(classify::ClassifyArgs),

    /// Count source files per language in a directory
    Languages(languages::LanguagesArgs),

    /// Delete every cached digest
    ClearCache,

    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Digest(args) => digest::run(*args, cli.verbose),
        Commands::Classify(args) => classify::run(args),
        Commands::Languages(args) => languages::run(args),
        Commands::ClearCache => cache::clear(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "repo-digest", &mut std::io::stdout());
            Ok(())
        }
    }
}
