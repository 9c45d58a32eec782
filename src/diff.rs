// src/diff.rs

use crate::error::Result;
use crate::model::{ChangeKind, Commit, FileChange};
use crate::repository::RepositoryHandle;
use git2::{DiffDelta, DiffFindOptions, Oid};

/// File-level changes of `commit` against its first parent. Root commits have none.
pub fn diff_against_parent(handle: &RepositoryHandle, commit: &Commit) -> Result<Vec<FileChange>> {
    let repo = handle.repo()?;
    let Some(parent_id) = commit.parents.first() else {
        return Ok(Vec::new());
    };

    let current_tree = repo.find_commit(Oid::from_str(&commit.id)?)?.tree()?;
    let parent_tree = repo.find_commit(Oid::from_str(parent_id)?)?.tree()?;

    let mut diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&current_tree), None)?;

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))?;

    Ok(diff.deltas().filter_map(|delta| to_file_change(&delta)).collect())
}

fn to_file_change(delta: &DiffDelta<'_>) -> Option<FileChange> {
    let old_path = delta.old_file().path().and_then(|p| p.to_str()).map(String::from);
    let new_path = delta.new_file().path().and_then(|p| p.to_str()).map(String::from);
    let kind = ChangeKind::from(delta.status());

    match kind {
        ChangeKind::Deleted => old_path.map(|path| FileChange { kind, path, old_path: None }),
        ChangeKind::Renamed => new_path.map(|path| FileChange { kind, path, old_path }),
        _ => new_path
            .or(old_path)
            .map(|path| FileChange { kind, path, old_path: None }),
    }
}
