//! Core data types shared across the acquisition, classification and assembly stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Reference checked out when the caller does not name one.
pub const DEFAULT_REFERENCE: &str = "main";

/// Cached remote digests older than this are refetched. Branch names move.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Schema version stamped into JSON reports.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Classification tag attached to every candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileClass {
    PriorityDoc,
    /// Reserved: the classifier never assigns it; ranks with `Source`.
    SecondaryDoc,
    /// Reserved: the classifier never assigns it; ranks with `Source`.
    BuildManifest,
    Source,
    Ignored,
}

impl FileClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileClass::PriorityDoc => "priority-doc",
            FileClass::SecondaryDoc => "secondary-doc",
            FileClass::BuildManifest => "build-manifest",
            FileClass::Source => "source",
            FileClass::Ignored => "ignored",
        }
    }

    pub fn is_eligible(&self) -> bool {
        !matches!(self, FileClass::Ignored)
    }

    /// Coarse ordering bucket. Only priority docs are pulled to the front.
    pub fn rank(&self) -> ClassRank {
        match self {
            FileClass::PriorityDoc => ClassRank::PriorityDoc,
            _ => ClassRank::Other,
        }
    }
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassRank {
    PriorityDoc,
    Other,
}

/// Ordering key for a classified file.
///
/// Field order matters: the derived `Ord` compares `rank`, then `tier`, then `name`.
/// Files outside the priority-doc class all share `tier == 0` and an empty name,
/// so a stable sort keeps them in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SortKey {
    pub rank: ClassRank,
    pub tier: u8,
    pub name: String,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            ClassRank::PriorityDoc => write!(f, "({}, {})", self.tier, self.name),
            ClassRank::Other => f.write_str("(traversal)"),
        }
    }
}

/// One on-disk file under a snapshot root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Path relative to the snapshot root, always `/`-separated.
    pub relative_path: String,
    pub size_bytes: u64,
    /// Lowercased extension with a leading dot, or empty.
    pub extension: String,
}

/// A selected file and its (possibly truncated) content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub path: String,
    pub content: String,
}

/// File-count and per-file byte limits enforced during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub max_files: NonZeroUsize,
    pub max_bytes_per_file: NonZeroUsize,
}

impl Budget {
    pub fn new(max_files: NonZeroUsize, max_bytes_per_file: NonZeroUsize) -> Self {
        Self { max_files, max_bytes_per_file }
    }

    /// Build a budget from plain integers, rejecting zero.
    pub fn try_from_counts(max_files: usize, max_bytes_per_file: usize) -> Option<Self> {
        Some(Self {
            max_files: NonZeroUsize::new(max_files)?,
            max_bytes_per_file: NonZeroUsize::new(max_bytes_per_file)?,
        })
    }

    /// 15 files of at most 4000 bytes, sized for a single chat prompt.
    pub fn prompt() -> Self {
        Self {
            max_files: NonZeroUsize::new(15).unwrap_or(NonZeroUsize::MIN),
            max_bytes_per_file: NonZeroUsize::new(4_000).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Every eligible file, each capped at 200 000 bytes.
    pub fn context() -> Self {
        Self {
            max_files: NonZeroUsize::MAX,
            max_bytes_per_file: NonZeroUsize::new(200_000).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::prompt()
    }
}

/// Named budget presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Prompt,
    Context,
}

impl Profile {
    pub fn budget(&self) -> Budget {
        match self {
            Profile::Prompt => Budget::prompt(),
            Profile::Context => Budget::context(),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Profile::Prompt),
            "context" => Ok(Profile::Context),
            other => Err(format!("Invalid profile '{other}' (expected 'prompt' or 'context')")),
        }
    }
}

/// User configuration. Unset budget fields fall back to the profile's preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<NonZeroUsize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes_per_file: Option<NonZeroUsize>,
    pub reference: String,
    /// Maximum age of a cached remote digest, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            max_files: None,
            max_bytes_per_file: None,
            reference: DEFAULT_REFERENCE.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn budget(&self) -> Budget {
        let preset = self.profile.budget();
        Budget {
            max_files: self.max_files.unwrap_or(preset.max_files),
            max_bytes_per_file: self.max_bytes_per_file.unwrap_or(preset.max_bytes_per_file),
        }
    }
}

/// Counters collected while assembling a snapshot.
///
/// Files under pruned noise directories are never visited, so they show up only in
/// `dirs_pruned`; `files_ignored` counts visited files the classifier rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyStats {
    pub files_scanned: usize,
    pub dirs_pruned: usize,
    pub files_ignored: usize,
    pub files_eligible: usize,
    pub files_emitted: usize,
    pub files_truncated: usize,
    pub files_unreadable: usize,
    pub bytes_emitted: usize,
}

/// Output of one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub records: Vec<ContextRecord>,
    pub stats: AssemblyStats,
}
