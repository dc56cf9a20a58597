//! JSONL rendering

use crate::domain::ContextRecord;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn render_jsonl(records: &[ContextRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        // BTreeMap keeps keys in alphabetical order for stable output.
        let mut entry: BTreeMap<&str, Value> = BTreeMap::new();
        entry.insert("content", Value::String(record.content.clone()));
        entry.insert("path", Value::String(record.path.clone()));

        if let Ok(line) = serde_json::to_string(&entry) {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
