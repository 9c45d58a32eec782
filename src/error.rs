// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path does not exist or is not a readable directory: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("no git repository found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open repository at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    #[error("repository handle is not open")]
    NotOpen,

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
