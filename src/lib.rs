// src/lib.rs

//! Git repository activity analytics: locate a repository, load a branch's
//! history, aggregate per-day, per-author and per-file activity, inspect
//! per-commit file changes and export commit lists as CSV or JSON.

pub mod analyzer;
pub mod cli;
pub mod diff;
pub mod error;
pub mod export;
pub mod locator;
pub mod model;
pub mod repository;

pub use analyzer::{analyze, analyze_with_progress};
pub use diff::diff_against_parent;
pub use error::{Error, Result};
pub use export::{export, to_csv, to_json, ExportFormat};
pub use locator::discover;
pub use model::{ActivityInsights, ChangeKind, Commit, FileChange, RepositoryRoot};
pub use repository::RepositoryHandle;
