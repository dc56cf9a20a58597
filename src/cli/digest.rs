//! Digest command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::cache::open_digest_cache;
use crate::config::{apply_env_overrides, load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Profile;
use crate::error::{AcquisitionError, FailureDomain};
use crate::fetch::Source;
use crate::pipeline::{digest_repository, Digest};
use crate::render::{render_jsonl, render_prompt, render_report, OutputFormat, ReportSource};
use crate::store::DigestStore;

#[derive(Args)]
pub struct DigestArgs {
    /// Repository URL to clone (https://, ssh://, git://, file:// or user@host:path)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Local directory to digest instead of cloning
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Branch, tag or commit to check out (default: main)
    #[arg(long = "ref", value_name = "REF")]
    pub reference: Option<String>,

    /// Maximum number of files to emit
    #[arg(long, value_name = "N")]
    pub max_files: Option<NonZeroUsize>,

    /// Maximum bytes of content per file
    #[arg(long, value_name = "BYTES")]
    pub max_bytes_per_file: Option<NonZeroUsize>,

    /// Budget preset: prompt (15 files, 4000 bytes) or context
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<Profile>,

    /// Output format: prompt, jsonl or json
    #[arg(short, long, value_name = "FORMAT", default_value = "prompt")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Omit the timestamp from the JSON report
    #[arg(long)]
    pub no_timestamp: bool,

    /// Reuse and store digests of remote repositories in the local cache
    #[arg(long)]
    pub cache: bool,

    /// Seconds a cached digest stays valid (default: 3600)
    #[arg(long, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Path to config file (repo-digest.toml or repo-digest.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: DigestArgs, verbose: bool) -> Result<()> {
    let start_time = Instant::now();

    let source = match (&args.url, &args.path) {
        (Some(_), Some(_)) => anyhow::bail!("Cannot specify both a repository URL and --path"),
        (None, None) => anyhow::bail!("Either a repository URL or --path must be specified"),
        (Some(url), None) => Source::Remote(url.as_str()),
        (None, Some(path)) => Source::Local(path.as_path()),
    };

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        apply_env_overrides(file_config)?,
        CliOverrides {
            profile: args.profile,
            max_files: args.max_files,
            max_bytes_per_file: args.max_bytes_per_file,
            reference: args.reference.clone(),
            cache_ttl_secs: args.cache_ttl,
        },
    );
    let budget = config.budget();
    tracing::debug!(?budget, reference = %config.reference, "resolved configuration");

    // Only remote sources are cached; an unusable cache is skipped.
    let cache = match source {
        Source::Remote(_) if args.cache => match open_digest_cache(config.cache_ttl()) {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!("Digest cache unavailable, continuing without it: {:#}", err);
                None
            }
        },
        _ => None,
    };

    let spinner = (!verbose && std::io::stderr().is_terminal()).then(|| start_spinner(&source));
    let result = digest_repository(
        source,
        &config.reference,
        budget,
        cache.as_ref().map(|store| store as &dyn DigestStore),
    );
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let Digest { assembly, cached } = match result {
        Ok(digest) => digest,
        Err(err) => return Err(report_acquisition_failure(err)),
    };

    let source_label = match source {
        Source::Remote(url) => url.to_string(),
        Source::Local(path) => path.display().to_string(),
    };
    let rendered = match args.format {
        OutputFormat::Prompt => render_prompt(&assembly.records),
        OutputFormat::Jsonl => render_jsonl(&assembly.records),
        OutputFormat::Json => render_report(
            &ReportSource { url: &source_label, reference: &config.reference, cached },
            budget,
            &assembly,
            !args.no_timestamp,
        )?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!(
                "{} {} file(s), {} bytes -> {} in {:.2}s{}",
                style("Wrote").green().bold(),
                assembly.stats.files_emitted,
                assembly.stats.bytes_emitted,
                path.display(),
                start_time.elapsed().as_secs_f64(),
                if cached { " (cached)" } else { "" }
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn start_spinner(source: &Source<'_>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(spinner_style.tick_chars("-\\|/ "));
    }
    pb.set_message(match source {
        Source::Remote(url) => format!("Cloning {url}"),
        Source::Local(path) => format!("Reading {}", path.display()),
    });
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print the failure domain and hint, then hand the error back for a non-zero exit.
fn report_acquisition_failure(err: AcquisitionError) -> anyhow::Error {
    let label = match err.domain() {
        FailureDomain::Repository => "repository unreachable or private",
        FailureDomain::Tool => "analysis tool error",
    };
    eprintln!("{} {}", style("hint:").yellow().bold(), err.hint());
    anyhow::Error::new(err).context(label)
}
