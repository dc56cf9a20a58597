//! File classification and priority ordering

use crate::domain::{CandidateFile, FileClass, SortKey};

pub mod classifier;

pub use classifier::{classify, sort_key};

/// A candidate with its class and ordering key attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub file: CandidateFile,
    pub class: FileClass,
    pub key: SortKey,
}

/// Classify every candidate, keeping traversal order.
pub fn classify_files(files: Vec<CandidateFile>) -> Vec<ClassifiedFile> {
    files
        .into_iter()
        .map(|file| {
            let class = classify(&file.relative_path);
            let key = sort_key(class, &file.relative_path);
            ClassifiedFile { file, class, key }
        })
        .collect()
}

/// Drop ignored files and stable-sort the rest by key.
///
/// Equal keys keep their traversal order, which is what leaves source files unsorted.
pub fn rank_files(files: Vec<CandidateFile>) -> Vec<ClassifiedFile> {
    let mut ranked: Vec<ClassifiedFile> =
        classify_files(files).into_iter().filter(|f| f.class.is_eligible()).collect();
    ranked.sort_by(|a, b| a.key.cmp(&b.key));
    ranked
}
