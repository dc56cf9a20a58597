//! Shared helpers

pub mod encoding;
pub mod hashing;
pub mod paths;

pub use encoding::{read_text_prefix, truncate_to_byte_budget};
pub use hashing::stable_key;
pub use paths::{dotted_extension, normalize_path, relative_to};
