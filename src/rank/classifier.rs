//! Path-only file classification.
//!
//! Rules are applied in order and the first match wins:
//! 1. any noise-directory segment → `Ignored`
//! 2. binary/media/archive extension → `Ignored`
//! 3. priority documentation filename, or md/txt/rst at the root → `PriorityDoc`
//! 4. md/txt/rst under a `docs`/`doc`/`documentation` ancestor → `PriorityDoc`
//! 5. everything else → `Source`

use crate::domain::{ClassRank, FileClass, SortKey};
use crate::utils::{dotted_extension, normalize_path};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Directory names whose contents never reach the output.
static NOISE_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // version control
        ".git",
        ".hg",
        ".svn",
        // dependency installs
        "node_modules",
        "bower_components",
        ".venv",
        "venv",
        // build output
        "dist",
        "build",
        "out",
        "target",
        ".next",
        ".nuxt",
        // caches
        ".cache",
        ".parcel-cache",
        ".turbo",
        ".gradle",
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
        "coverage",
    ]
    .into_iter()
    .collect()
});

static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tiff", ".svgz", ".psd",
        ".pdf", ".exe", ".dll", ".so", ".dylib", ".o", ".a", ".lib", ".class", ".jar", ".pyc",
        ".pyo", ".wasm", ".bin", ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar",
        ".mp3", ".mp4", ".wav", ".ogg", ".flac", ".mov", ".avi", ".mkv", ".webm", ".ttf", ".otf",
        ".woff", ".woff2", ".eot", ".db", ".sqlite", ".sqlite3",
    ]
    .into_iter()
    .collect()
});

static PRIORITY_DOC_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "readme.md",
        "readme.txt",
        "readme.rst",
        "readme",
        "contributing.md",
        "contributing.txt",
        "contributors.md",
        "license",
        "license.md",
        "license.txt",
        "licence",
        "licence.md",
        "changelog.md",
        "changelog.txt",
        "history.md",
        "changes.md",
        "install.md",
        "installation.md",
        "setup.md",
        "config.md",
        "configuration.md",
        "api.md",
        "docs.md",
        "documentation.md",
        "getting-started.md",
        "quickstart.md",
        "usage.md",
        "examples.md",
    ]
    .into_iter()
    .collect()
});

const DOC_DIRS: &[&str] = &["docs", "doc", "documentation"];

/// Exact lowercased names that sort in the contribution-guidance tier.
const CONTRIBUTION_DOC_NAMES: &[&str] = &["contributing.md", "contributing.txt", "contributors.md"];
const DOC_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst"];

/// `true` when `name` is a directory the scanner can prune outright.
pub fn is_noise_dir(name: &str) -> bool {
    NOISE_DIRS.contains(name)
}

pub fn is_binary_extension(extension: &str) -> bool {
    BINARY_EXTENSIONS.contains(extension.to_ascii_lowercase().as_str())
}

pub fn is_priority_doc_name(file_name: &str) -> bool {
    PRIORITY_DOC_NAMES.contains(file_name.to_ascii_lowercase().as_str())
}

/// Classify a snapshot-relative path. Never touches the filesystem.
pub fn classify(relative_path: &str) -> FileClass {
    let normalized = normalize_path(relative_path);
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    let Some((file_name, dirs)) = segments.split_last() else {
        return FileClass::Ignored;
    };

    if segments.iter().any(|segment| is_noise_dir(segment)) {
        return FileClass::Ignored;
    }

    let extension = dotted_extension(file_name);
    if is_binary_extension(&extension) {
        return FileClass::Ignored;
    }

    let is_doc_extension = DOC_EXTENSIONS.contains(&extension.as_str());

    if is_priority_doc_name(file_name) || (dirs.is_empty() && is_doc_extension) {
        return FileClass::PriorityDoc;
    }

    if is_doc_extension
        && dirs.iter().any(|dir| DOC_DIRS.contains(&dir.to_ascii_lowercase().as_str()))
    {
        return FileClass::PriorityDoc;
    }

    FileClass::Source
}

/// Ordering key for a classified path.
///
/// Priority docs order by tier (README, contribution guidance, license, rest) and
/// then lowercased filename. Every other class shares one key.
pub fn sort_key(class: FileClass, relative_path: &str) -> SortKey {
    if class.rank() != ClassRank::PriorityDoc {
        return SortKey { rank: class.rank(), tier: 0, name: String::new() };
    }

    let normalized = normalize_path(relative_path);
    let name = normalized.rsplit('/').next().unwrap_or("").to_ascii_lowercase();
    let tier = if name.starts_with("readme") {
        0
    } else if CONTRIBUTION_DOC_NAMES.contains(&name.as_str()) {
        1
    } else if name.starts_with("license") || name.starts_with("licence") {
        2
    } else {
        3
    };

    SortKey { rank: ClassRank::PriorityDoc, tier, name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_identification() {
        let cases = [
            ("README.md", FileClass::PriorityDoc),
            ("readme.txt", FileClass::PriorityDoc),
            ("CONTRIBUTING.md", FileClass::PriorityDoc),
            ("LICENSE", FileClass::PriorityDoc),
            ("docs/api.md", FileClass::PriorityDoc),
            ("documentation/setup.md", FileClass::PriorityDoc),
            ("quickstart.md", FileClass::PriorityDoc),
            ("src/main.py", FileClass::Source),
            ("config/settings.json", FileClass::Source),
            ("tests/test_main.py", FileClass::Source),
        ];
        for (path, expected) in cases {
            assert_eq!(classify(path), expected, "{path}");
        }
    }

    #[test]
    fn test_noise_segments_always_ignored() {
        for path in [
            ".git/config",
            "node_modules/x.js",
            "web/node_modules/react/README.md",
            "dist/bundle.js",
            "build/docs/guide.md",
            "app/.next/server.js",
            ".cache/README.md",
        ] {
            assert_eq!(classify(path), FileClass::Ignored, "{path}");
        }
    }

    #[test]
    fn test_noise_match_is_exact_segment() {
        assert_eq!(classify("src/builder.rs"), FileClass::Source);
        assert_eq!(classify("distribution/notes.py"), FileClass::Source);
    }

    #[test]
    fn test_binary_extension_beats_doc_name() {
        assert_eq!(classify("logo.png"), FileClass::Ignored);
        assert_eq!(classify("docs/manual.PDF"), FileClass::Ignored);
        assert_eq!(classify("README.zip"), FileClass::Ignored);
    }

    #[test]
    fn test_root_text_files_are_priority_docs() {
        assert_eq!(classify("NOTES.md"), FileClass::PriorityDoc);
        assert_eq!(classify("notes.rst"), FileClass::PriorityDoc);
        assert_eq!(classify("todo.txt"), FileClass::PriorityDoc);
        assert_eq!(classify("src/notes.md"), FileClass::Source);
    }

    #[test]
    fn test_doc_dirs_need_doc_extension() {
        assert_eq!(classify("Docs/Guide.MD"), FileClass::PriorityDoc);
        assert_eq!(classify("docs/conf.py"), FileClass::Source);
        assert_eq!(classify("pkg/doc/nested/intro.txt"), FileClass::PriorityDoc);
    }

    #[test]
    fn test_dotfiles_not_special() {
        assert_eq!(classify(".gitignore"), FileClass::Source);
        assert_eq!(classify(".github/workflows/ci.yml"), FileClass::Source);
    }

    #[test]
    fn test_backslash_paths_normalized() {
        assert_eq!(classify("node_modules\\x.js"), FileClass::Ignored);
        assert_eq!(classify("docs\\api.md"), FileClass::PriorityDoc);
    }

    #[test]
    fn test_sort_key_tiers() {
        let key = |p: &str| sort_key(classify(p), p);
        assert!(key("README.md") < key("CONTRIBUTING.md"));
        assert!(key("CONTRIBUTING.md") < key("LICENSE"));
        assert!(key("LICENSE") < key("api.md"));
        assert!(key("docs/api.md") < key("docs/usage.md"));
        assert!(key("usage.md") < key("src/main.py"));
        assert_eq!(key("src/a.py"), key("lib/z.py"));
    }

    #[test]
    fn test_contribution_tier_is_exact_names_only() {
        let key = |p: &str| sort_key(classify(p), p);
        assert_eq!(key("CONTRIBUTING.txt").tier, 1);
        assert_eq!(key("docs/Contributors.md").tier, 1);
        assert_eq!(key("CONTRIBUTORS.txt").tier, 3);
        assert_eq!(key("docs/contributing-guide.md").tier, 3);

        let mut paths = vec!["CONTRIBUTORS.txt", "api.md", "LICENSE"];
        paths.sort_by_key(|p| key(p));
        assert_eq!(paths, vec!["LICENSE", "api.md", "CONTRIBUTORS.txt"]);
    }

    #[test]
    fn test_readme_variants_share_top_tier() {
        let key = sort_key(FileClass::PriorityDoc, "docs/README.rst");
        assert_eq!(key.tier, 0);
        assert_eq!(key.name, "readme.rst");
    }

    #[test]
    fn test_classification_is_pure() {
        for path in ["README.md", "src/lib.rs", "node_modules/a.js", "docs/x.md"] {
            assert_eq!(classify(path), classify(path));
            assert_eq!(sort_key(classify(path), path), sort_key(classify(path), path));
        }
    }
}
