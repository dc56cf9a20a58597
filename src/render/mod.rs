//! Output rendering (prompt blob, JSONL, JSON report)

pub mod jsonl;
pub mod prompt;
pub mod report;

pub use jsonl::render_jsonl;
pub use prompt::render_prompt;
pub use report::{render_report, ReportSource};

use std::str::FromStr;

/// Output formats understood by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `FILE: {path}` blocks for a text prompt.
    #[default]
    Prompt,
    /// One `{"path","content"}` object per line.
    Jsonl,
    /// Pretty JSON report with stats and records.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" | "text" => Ok(OutputFormat::Prompt),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Invalid format '{other}' (expected prompt, jsonl or json)")),
        }
    }
}
