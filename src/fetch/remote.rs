//! Remote repository cloning

use crate::error::AcquisitionError;
use crate::fetch::RepositorySnapshot;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Direction, ErrorClass, ErrorCode, FetchOptions, Remote, Repository};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const URL_SCHEMES: &[&str] = &["https://", "http://", "ssh://", "git://", "file://"];

/// scp-style address such as `git@github.com:owner/repo.git`.
static SCP_LIKE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+:[^/\s][^\s]*$").unwrap());

/// Clone `url` at `reference` into a fresh temporary snapshot.
///
/// Tries a depth-1 clone of the reference first. If that fails for any reason
/// other than authentication, the remote's advertised refs are listed and a
/// full clone is made only when the reference is a known branch or tag, or
/// looks like a commit id or revision expression that must be resolved
/// locally. The `.git` directory is removed afterwards.
#[instrument(skip_all, fields(url = %url, reference = %reference))]
pub fn clone_repository(url: &str, reference: &str) -> Result<RepositorySnapshot, AcquisitionError> {
    let normalized = validate_url(url)?;
    let url = normalized.as_str();

    // Owned by the snapshot from here on; every early return below removes it.
    let snapshot = RepositorySnapshot::allocate(url, reference)?;
    let dest = snapshot.root();

    match shallow_clone(url, dest, reference) {
        Ok(repo) => drop(repo),
        Err(err) if is_auth_error(&err) => {
            return Err(AcquisitionError::AuthenticationRequired { url: url.to_string(), source: err });
        }
        Err(err) => {
            debug!("Shallow clone failed: {}", err);
            if !needs_local_resolution(reference) && !remote_advertises(url, reference)? {
                return Err(AcquisitionError::ReferenceNotFound {
                    url: url.to_string(),
                    reference: reference.to_string(),
                });
            }
            debug!("Falling back to full clone");
            reset_directory(dest)?;
            let repo = Repository::clone(url, dest).map_err(|e| classify_clone_error(url, e))?;
            checkout_reference(&repo, url, reference)?;
        }
    }

    discard_history(dest);
    info!(path = %dest.display(), "repository snapshot ready");
    Ok(snapshot)
}

/// Check that `url` looks like a git remote and return its normalized form.
pub fn validate_url(url: &str) -> Result<String, AcquisitionError> {
    let trimmed = url.trim();
    let has_scheme = URL_SCHEMES.iter().any(|scheme| {
        trimmed.len() > scheme.len()
            && trimmed.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if !has_scheme && !SCP_LIKE_URL.is_match(trimmed) {
        return Err(AcquisitionError::InvalidUrl { url: url.to_string() });
    }
    Ok(normalize_github_url(trimmed))
}

/// Normalize a GitHub URL to the canonical HTTPS `.git` form.
///
/// Examples:
/// - `https://github.com/owner/repo`    → `https://github.com/owner/repo.git`
/// - `https://github.com/owner/repo/`   → `https://github.com/owner/repo.git`
/// - `https://github.com/owner/repo.git`→ unchanged
/// - non-GitHub URLs                    → unchanged
pub fn normalize_github_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.contains("github.com") && !trimmed.ends_with(".git") {
        format!("{}.git", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Depth-1 clone with `reference` checked out as a branch.
fn shallow_clone(url: &str, dest: &Path, reference: &str) -> Result<Repository, git2::Error> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = RepoBuilder::new();
    builder.branch(reference);
    builder.fetch_options(fo);

    builder.clone(url, dest)
}

/// Whether the remote lists `reference` as a branch, tag or full ref name.
fn remote_advertises(url: &str, reference: &str) -> Result<bool, AcquisitionError> {
    let mut remote = Remote::create_detached(url).map_err(|e| classify_clone_error(url, e))?;
    remote.connect(Direction::Fetch).map_err(|e| classify_clone_error(url, e))?;

    let wanted = [
        format!("refs/heads/{reference}"),
        format!("refs/tags/{reference}"),
        reference.to_string(),
    ];
    let heads = remote.list().map_err(|e| classify_clone_error(url, e))?;
    let found = heads.iter().any(|head| wanted.iter().any(|name| name == head.name()));
    debug!(advertised = heads.len(), found, "listed remote refs");
    Ok(found)
}

/// Commit ids and revision expressions are never advertised, so only a full
/// clone can resolve them.
fn needs_local_resolution(reference: &str) -> bool {
    let abbreviated_id =
        (7..=40).contains(&reference.len()) && reference.bytes().all(|b| b.is_ascii_hexdigit());
    abbreviated_id || reference.contains(['~', '^', '@', ':'])
}

fn checkout_reference(
    repo: &Repository,
    url: &str,
    reference: &str,
) -> Result<(), AcquisitionError> {
    let object = repo
        .revparse_single(reference)
        .or_else(|_| repo.revparse_single(&format!("origin/{reference}")))
        .map_err(|_| AcquisitionError::ReferenceNotFound {
            url: url.to_string(),
            reference: reference.to_string(),
        })?;
    let commit = object.peel_to_commit().map_err(|_| AcquisitionError::ReferenceNotFound {
        url: url.to_string(),
        reference: reference.to_string(),
    })?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
    repo.set_head_detached(commit.id())?;
    debug!(commit = %commit.id(), "checked out reference");
    Ok(())
}

/// Empty `dest` after a failed clone attempt so the next clone starts clean.
fn reset_directory(dest: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(dest)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Drop `.git` so the snapshot holds only tracked files.
fn discard_history(root: &Path) {
    let git_dir = root.join(".git");
    if !git_dir.exists() {
        return;
    }
    if let Err(err) = fs::remove_dir_all(&git_dir) {
        warn!("Failed to discard history at {}: {}", git_dir.display(), err);
    }
}

fn is_auth_error(err: &git2::Error) -> bool {
    err.code() == ErrorCode::Auth
        || err.code() == ErrorCode::Certificate
        || err.message().to_ascii_lowercase().contains("authentication")
}

fn classify_clone_error(url: &str, err: git2::Error) -> AcquisitionError {
    if is_auth_error(&err) {
        return AcquisitionError::AuthenticationRequired { url: url.to_string(), source: err };
    }
    let network = matches!(
        err.class(),
        ErrorClass::Net | ErrorClass::Http | ErrorClass::Ssh | ErrorClass::Ssl
    );
    if network || err.code() == ErrorCode::NotFound {
        return AcquisitionError::Unreachable { url: url.to_string(), source: err };
    }
    AcquisitionError::Git(err)
}
