//! Local git fixtures shared by integration tests.

#![allow(dead_code)]

use git2::{Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `files` into `repo`'s work tree and commit them on HEAD.
pub fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str) -> git2::Oid {
    let root = repo.workdir().expect("non-bare fixture").to_path_buf();
    let mut index = repo.index().expect("index");
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&full, content).expect("write fixture file");
        index.add_path(Path::new(path)).expect("stage");
    }
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("tree");
    let sig = Signature::now("Fixture", "fixture@example.com").expect("signature");
    let parents = match repo.head().ok().and_then(|h| h.peel_to_commit().ok()) {
        Some(parent) => vec![parent],
        None => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs).expect("commit")
}

/// Repository on `main` with a README, a source file and a vendored dependency,
/// plus a `dev` branch and a `v1` tag.
pub fn fixture_repo() -> (TempDir, String) {
    let dir = TempDir::new().expect("fixture dir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init");

    let main_py = "x = 1\n".repeat(33);
    let first = commit_files(
        &repo,
        &[
            ("README.md", "# Test"),
            ("src/main.py", main_py.as_str()),
            ("node_modules/x.js", "module.exports = 1;"),
        ],
        "initial",
    );
    let commit = repo.find_commit(first).expect("commit");
    repo.tag_lightweight("v1", commit.as_object(), false).expect("tag");
    repo.branch("dev", &commit, false).expect("branch");

    commit_files(&repo, &[("CONTRIBUTING.md", "Be kind.")], "docs");

    let url = format!("file://{}", dir.path().display());
    (dir, url)
}
