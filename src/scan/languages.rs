//! Source language census over a snapshot.

use crate::domain::CandidateFile;
use crate::rank::classify;
use serde::Serialize;
use std::collections::BTreeMap;

/// Language name reported when no recognized source file exists.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Map a dotted, lowercased extension to a language name.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let language = match extension {
        ".py" => "Python",
        ".js" => "JavaScript",
        ".jsx" => "JavaScript (React)",
        ".ts" => "TypeScript",
        ".tsx" => "TypeScript (React)",
        ".java" => "Java",
        ".cpp" => "C++",
        ".c" => "C",
        ".cs" => "C#",
        ".go" => "Go",
        ".rb" => "Ruby",
        ".php" => "PHP",
        ".swift" => "Swift",
        ".kt" => "Kotlin",
        ".rs" => "Rust",
        ".html" => "HTML",
        ".css" => "CSS",
        ".scss" => "SCSS",
        ".sql" => "SQL",
        _ => return None,
    };
    Some(language)
}

/// File counts per language, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageCensus {
    pub counts: BTreeMap<String, usize>,
}

impl LanguageCensus {
    /// Languages sorted by descending count, then name.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut langs: Vec<(&str, usize)> =
            self.counts.iter().map(|(name, count)| (name.as_str(), *count)).collect();
        langs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        langs
    }
}

/// Count recognized languages among files the classifier does not ignore.
pub fn language_census(files: &[CandidateFile]) -> LanguageCensus {
    let mut census = LanguageCensus::default();
    for file in files {
        if !classify(&file.relative_path).is_eligible() {
            continue;
        }
        if let Some(language) = language_for_extension(&file.extension) {
            *census.counts.entry(language.to_string()).or_insert(0) += 1;
        }
    }
    census
}

/// Most common language and its file count; `("Unknown", 0)` for an empty census.
pub fn primary_language(census: &LanguageCensus) -> (String, usize) {
    census
        .ranked()
        .first()
        .map(|(name, count)| (name.to_string(), *count))
        .unwrap_or_else(|| (UNKNOWN_LANGUAGE.to_string(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(path: &str) -> CandidateFile {
        CandidateFile {
            relative_path: path.to_string(),
            size_bytes: 0,
            extension: crate::utils::dotted_extension(path),
        }
    }

    #[test]
    fn census_skips_ignored_paths() {
        let files = vec![
            candidate("src/a.ts"),
            candidate("src/b.ts"),
            candidate("node_modules/lib/index.js"),
            candidate("dist/out.js"),
            candidate("scripts/run.py"),
            candidate("README.md"),
        ];
        let census = language_census(&files);
        assert_eq!(census.counts.get("TypeScript"), Some(&2));
        assert_eq!(census.counts.get("Python"), Some(&1));
        assert!(!census.counts.contains_key("JavaScript"));
        assert_eq!(primary_language(&census), ("TypeScript".to_string(), 2));
    }

    #[test]
    fn ties_break_by_name() {
        let census = language_census(&[candidate("a.rs"), candidate("b.go")]);
        assert_eq!(primary_language(&census).0, "Go");
    }

    #[test]
    fn empty_census_is_unknown() {
        let census = language_census(&[candidate("README.md")]);
        assert_eq!(primary_language(&census), ("Unknown".to_string(), 0));
    }
}
