//! repo-digest: clone a repository and print a budgeted digest of its files

use anyhow::Result;

fn main() -> Result<()> {
    repo_digest::cli::run()
}
