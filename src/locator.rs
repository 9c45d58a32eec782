// src/locator.rs

use crate::error::{Error, Result};
use crate::model::RepositoryRoot;
use git2::{ErrorCode, Repository};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Finds the repository enclosing `start`, checking `start` first and then each parent.
///
/// Metadata that libgit2 does not recognise as a repository is skipped. The root is the
/// working directory, or the git directory itself for bare repositories.
pub fn discover(start: &Path) -> Result<RepositoryRoot> {
    let start = start
        .canonicalize()
        .map_err(|_| Error::InvalidPath(start.to_path_buf()))?;
    match fs::metadata(&start) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(Error::InvalidPath(start)),
    }
    fs::read_dir(&start).map_err(|_| Error::InvalidPath(start.clone()))?;

    let repo = match Repository::discover(&start) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => return Err(Error::NotFound(start)),
        Err(source) => return Err(Error::Open { path: start, source }),
    };

    let root = repo.workdir().unwrap_or_else(|| repo.path());
    debug!("Found repository root at {}", root.display());
    Ok(RepositoryRoot::new(root))
}
