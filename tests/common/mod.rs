#![allow(dead_code)]

use git2::{ObjectType, Oid, Repository, RepositoryInitOptions, Signature, Time};
use git_activity::{RepositoryHandle, RepositoryRoot};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const DAY: i64 = 86_400;
/// 2024-01-01T12:00:00Z
pub const DAY_ONE_NOON: i64 = 1_704_110_400;

/// Scratch repository on a `main` branch whose commits get explicit authors and times.
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to initialize repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn handle(&self) -> RepositoryHandle {
        RepositoryHandle::open(&RepositoryRoot::new(self.path())).expect("Failed to open handle")
    }

    /// Applies `changes` (path, Some(content) to write, None to delete) and commits on HEAD.
    pub fn commit(&self, author: &str, time: i64, message: &str, changes: &[(&str, Option<&str>)]) -> Oid {
        let parents = self.head_commit().into_iter().collect::<Vec<_>>();
        self.commit_with_parents(author, time, message, changes, &parents)
    }

    /// Commits with an explicit parent list and moves HEAD to it.
    pub fn commit_with_parents(
        &self,
        author: &str,
        time: i64,
        message: &str,
        changes: &[(&str, Option<&str>)],
        parents: &[Oid],
    ) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");
        for (path, content) in changes {
            let full = self.path().join(path);
            match content {
                Some(content) => {
                    if let Some(dir) = full.parent() {
                        fs::create_dir_all(dir).expect("Failed to create directory");
                    }
                    fs::write(&full, content).expect("Failed to write file");
                    index.add_path(Path::new(path)).expect("Failed to add file");
                }
                None => {
                    fs::remove_file(&full).expect("Failed to remove file");
                    index.remove_path(Path::new(path)).expect("Failed to remove from index");
                }
            }
        }
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let signature = Signature::new(author, &format!("{author}@example.com"), &Time::new(time, 0))
            .expect("Failed to create signature");
        let parent_commits: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Failed to find parent"))
            .collect();
        let parent_refs: Vec<_> = parent_commits.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)
            .expect("Failed to commit")
    }

    /// Writes a commit object byte for byte on top of `parent` and moves `main` to it.
    pub fn raw_commit(&self, author: &str, time: i64, parent: Oid, encoding: &str, message: &[u8]) -> Oid {
        let tree = self.repo.find_commit(parent).expect("Failed to find parent").tree_id();
        let mut buf = format!(
            "tree {tree}\nparent {parent}\n\
             author {author} <{author}@example.com> {time} +0000\n\
             committer {author} <{author}@example.com> {time} +0000\n\
             encoding {encoding}\n\n"
        )
        .into_bytes();
        buf.extend_from_slice(message);

        let odb = self.repo.odb().expect("Failed to open object database");
        let oid = odb.write(ObjectType::Commit, &buf).expect("Failed to write commit object");
        self.repo
            .reference("refs/heads/main", oid, true, "raw commit")
            .expect("Failed to move main");
        oid
    }

    pub fn head_commit(&self) -> Option<Oid> {
        self.repo.head().ok().and_then(|h| h.target())
    }

    pub fn create_branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).expect("Failed to find commit");
        self.repo.branch(name, &commit, true).expect("Failed to create branch");
    }

    /// Points HEAD at `branch` without touching the index or working tree.
    pub fn switch_head(&self, branch: &str) {
        self.repo
            .set_head(&format!("refs/heads/{branch}"))
            .expect("Failed to set HEAD");
    }
}
