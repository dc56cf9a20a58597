//! Report JSON generation.

use crate::domain::{Assembly, Budget, REPORT_SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};

/// Where the assembled snapshot came from.
#[derive(Debug, Clone)]
pub struct ReportSource<'a> {
    pub url: &'a str,
    pub reference: &'a str,
    pub cached: bool,
}

pub fn render_report(
    source: &ReportSource<'_>,
    budget: Budget,
    assembly: &Assembly,
    include_timestamp: bool,
) -> Result<String> {
    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert(
        "source".to_string(),
        json!({
            "url": source.url,
            "reference": source.reference,
            "cached": source.cached,
        }),
    );
    report.insert("budget".to_string(), serde_json::to_value(budget)?);
    report.insert("stats".to_string(), serde_json::to_value(&assembly.stats)?);
    report.insert("records".to_string(), serde_json::to_value(&assembly.records)?);

    Ok(serde_json::to_string_pretty(&Value::Object(report))?)
}
