//! Languages command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::scan::{language_census, primary_language, FileScanner};

#[derive(Args)]
pub struct LanguagesArgs {
    /// Local directory to analyze
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Skip files matched by .gitignore
    #[arg(long)]
    pub gitignore: bool,

    /// Emit the census as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: LanguagesArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Cannot access {}", args.path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let files = FileScanner::new(root).respect_gitignore(args.gitignore).scan();
    let census = language_census(&files);
    let (primary, primary_count) = primary_language(&census);

    if args.json {
        let out = serde_json::json!({
            "primary": { "language": primary, "files": primary_count },
            "languages": census.counts,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Primary language: {} ({} files)", primary, primary_count);
    for (language, count) in census.ranked() {
        println!("  {:<20} {}", language, count);
    }
    Ok(())
}
