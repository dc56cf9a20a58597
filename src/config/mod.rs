//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::{apply_env_overrides, load_config, ENV_PREFIX};
pub use merge::{merge_cli_with_config, CliOverrides};
