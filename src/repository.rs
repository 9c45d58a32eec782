// src/repository.rs

use crate::error::{Error, Result};
use crate::model::{Commit, RepositoryRoot};
use git2::{BranchType, ErrorCode, Repository, Sort};
use tracing::{debug, info};

/// An open repository. Every operation fails with [`Error::NotOpen`] after [`close`](Self::close).
pub struct RepositoryHandle {
    root: RepositoryRoot,
    repo: Option<Repository>,
}

impl RepositoryHandle {
    pub fn open(root: &RepositoryRoot) -> Result<Self> {
        let repo = Repository::open(root.path()).map_err(|source| Error::Open {
            path: root.path().to_path_buf(),
            source,
        })?;
        debug!("Opened repository at {}", root.path().display());

        Ok(Self {
            root: root.clone(),
            repo: Some(repo),
        })
    }

    pub fn root(&self) -> &RepositoryRoot {
        &self.root
    }

    pub fn is_open(&self) -> bool {
        self.repo.is_some()
    }

    /// Releases the underlying repository.
    pub fn close(&mut self) {
        if self.repo.take().is_some() {
            debug!("Closed repository at {}", self.root.path().display());
        }
    }

    pub(crate) fn repo(&self) -> Result<&Repository> {
        self.repo.as_ref().ok_or(Error::NotOpen)
    }

    /// Local branch names, sorted.
    pub fn branches(&self) -> Result<Vec<String>> {
        let repo = self.repo()?;
        let mut names = Vec::new();
        for branch in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Name of the branch HEAD points at, `None` when detached or unborn.
    pub fn head_branch(&self) -> Result<Option<String>> {
        let repo = self.repo()?;
        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(String::from))
    }

    /// Commits reachable from the tip of `branch`, newest first, at most `limit` of them.
    ///
    /// All parents are followed and ordered by time, so a newer side-branch commit comes
    /// before an older first-parent commit.
    pub fn load_commits(&self, branch: &str, limit: Option<usize>) -> Result<Vec<Commit>> {
        let repo = self.repo()?;
        let tip = match repo.find_branch(branch, BranchType::Local) {
            Ok(b) => b.get().peel_to_commit()?.id(),
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => {
                return Err(Error::BranchNotFound(branch.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push(tip)?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let limit = limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();
        for oid in revwalk.take(limit) {
            let commit = repo.find_commit(oid?)?;
            commits.push(Commit::from_git(&commit));
        }

        info!("Loaded {} commits from branch {}", commits.len(), branch);
        Ok(commits)
    }

    /// Resolves a revision expression (id, abbreviated id, `HEAD~1`, branch) to a commit.
    pub fn find_commit(&self, rev: &str) -> Result<Commit> {
        let repo = self.repo()?;
        let object = repo
            .revparse_single(rev)
            .map_err(|_| Error::RevisionNotFound(rev.to_string()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| Error::RevisionNotFound(rev.to_string()))?;
        Ok(Commit::from_git(&commit))
    }
}

impl std::fmt::Debug for RepositoryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryHandle")
            .field("root", &self.root)
            .field("open", &self.is_open())
            .finish()
    }
}
