//! Classify command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::rank::{classify_files, ClassifiedFile};
use crate::scan::FileScanner;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Local directory to classify
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Skip files matched by .gitignore
    #[arg(long)]
    pub gitignore: bool,

    /// Only show files that would be eligible for a digest
    #[arg(long)]
    pub eligible_only: bool,
}

pub fn run(args: ClassifyArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Cannot access {}", args.path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let files = FileScanner::new(root).respect_gitignore(args.gitignore).scan();
    let mut classified = classify_files(files);
    // Eligible files in assembly order, ignored files last in traversal order.
    classified.sort_by(|a, b| {
        b.class.is_eligible().cmp(&a.class.is_eligible()).then_with(|| match a.class.is_eligible() {
            true => a.key.cmp(&b.key),
            false => std::cmp::Ordering::Equal,
        })
    });

    for entry in classified.iter().filter(|c| !args.eligible_only || c.class.is_eligible()) {
        println!("{}", format_line(entry));
    }
    Ok(())
}

fn format_line(entry: &ClassifiedFile) -> String {
    format!("{:<13} {:<24} {}", entry.class.as_str(), entry.key.to_string(), entry.file.relative_path)
}
