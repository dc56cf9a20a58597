//! Stable hashing for digest cache keys

use sha2::{Digest, Sha256};

/// SHA-256 hex over newline-joined parts.
pub fn stable_key(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            hasher.update("\n");
        }
        hasher.update(part.trim());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::stable_key;

    #[test]
    fn key_is_hex_sha256_and_order_sensitive() {
        let a = stable_key(&["https://github.com/o/r", "main"]);
        let b = stable_key(&["main", "https://github.com/o/r"]);
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_eq!(a, stable_key(&["https://github.com/o/r ", "main"]));
    }
}
