//! CLI overrides on top of file/env configuration

use crate::domain::{Config, Profile};
use std::num::NonZeroUsize;

/// Values given explicitly on the command line. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub profile: Option<Profile>,
    pub max_files: Option<NonZeroUsize>,
    pub max_bytes_per_file: Option<NonZeroUsize>,
    pub reference: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }
    if let Some(max_files) = cli.max_files {
        config.max_files = Some(max_files);
    }
    if let Some(max_bytes) = cli.max_bytes_per_file {
        config.max_bytes_per_file = Some(max_bytes);
    }
    if let Some(ttl) = cli.cache_ttl_secs {
        config.cache_ttl_secs = ttl;
    }
    if let Some(reference) = cli.reference {
        let trimmed = reference.trim();
        if !trimmed.is_empty() {
            config.reference = trimmed.to_string();
        }
    }
    config
}
