//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Relative path of `path` under `root`, `/`-separated. `None` when `path` is outside `root`.
pub fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(normalize_path(rel.to_string_lossy().as_ref()))
}

/// Lowercased extension with a leading dot (`.md`), or empty when there is none.
pub fn dotted_extension(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[pos..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
