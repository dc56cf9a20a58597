//! Prompt-blob rendering

use crate::domain::ContextRecord;

/// Concatenate records as `FILE: {path}\n{content}\n` blocks, in order.
pub fn render_prompt(records: &[ContextRecord]) -> String {
    let capacity = records.iter().map(|r| r.path.len() + r.content.len() + 8).sum();
    let mut out = String::with_capacity(capacity);
    for record in records {
        out.push_str("FILE: ");
        out.push_str(&record.path);
        out.push('\n');
        out.push_str(&record.content);
        out.push('\n');
    }
    out
}
