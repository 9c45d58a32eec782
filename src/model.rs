// src/model.rs

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Number of characters shown for the longest commit message
pub const LONGEST_MESSAGE_DISPLAY_CHARS: usize = 300;

/// Per-key commit or change counter
pub type CountMap<K> = BTreeMap<K, usize>;

/// Top-level directory holding the `.git` metadata entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRoot(PathBuf);

impl RepositoryRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A single commit as seen by the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full hex object id
    pub id: String,
    pub author: String,
    /// Author timestamp in the author's own offset
    pub time: DateTime<FixedOffset>,
    /// First line of the message
    pub summary: String,
    pub message: String,
    /// Parent ids, first parent first
    pub parents: Vec<String>,
}

impl Commit {
    pub(crate) fn from_git(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let when = author.when();

        Self {
            id: commit.id().to_string(),
            author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            time: to_datetime(when.seconds(), when.offset_minutes()),
            // Messages in legacy encodings are kept, with invalid bytes replaced
            summary: lossy(commit.summary_bytes()),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
        }
    }

    /// First 8 hex characters of the id
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Calendar date of the commit in the author's timezone
    pub fn local_date(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

fn lossy(bytes: Option<&[u8]>) -> String {
    bytes.map(|b| String::from_utf8_lossy(b).into_owned()).unwrap_or_default()
}

fn to_datetime(seconds: i64, offset_minutes: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    let utc = Utc.timestamp_opt(seconds, 0).single().unwrap_or_else(|| {
        warn!("Commit timestamp {} is out of range, using the epoch", seconds);
        DateTime::<Utc>::default()
    });
    utc.with_timezone(&offset)
}

/// Classification of a single file-level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Other,
}

impl From<git2::Delta> for ChangeKind {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => ChangeKind::Added,
            git2::Delta::Deleted => ChangeKind::Deleted,
            git2::Delta::Modified => ChangeKind::Modified,
            git2::Delta::Renamed => ChangeKind::Renamed,
            _ => ChangeKind::Other,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Added => "A",
            ChangeKind::Deleted => "D",
            ChangeKind::Modified => "M",
            ChangeKind::Renamed => "R",
            ChangeKind::Other => "?",
        };
        f.write_str(label)
    }
}

/// A path touched by a commit relative to its first parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub kind: ChangeKind,
    /// New path, or the old path for deletions
    pub path: String,
    /// Previous path, only set for renames
    pub old_path: Option<String>,
}

/// Aggregated activity over a set of commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityInsights {
    pub total_commits: usize,
    pub commits_per_day: CountMap<NaiveDate>,
    pub commits_per_author: CountMap<String>,
    pub changes_per_file: CountMap<String>,
    pub busiest_day: Option<(NaiveDate, usize)>,
    pub most_active_author: Option<(String, usize)>,
    pub top_modified_file: Option<(String, usize)>,
    /// Full text of the longest commit message, untruncated
    pub longest_message: Option<String>,
    pub first_commit: Option<DateTime<FixedOffset>>,
    pub last_commit: Option<DateTime<FixedOffset>>,
}

impl ActivityInsights {
    /// Commits per day in date order, for time-series display
    pub fn daily_series(&self) -> Vec<(NaiveDate, usize)> {
        self.commits_per_day.iter().map(|(&d, &n)| (d, n)).collect()
    }

    pub fn longest_message_display(&self) -> Option<String> {
        self.longest_message
            .as_deref()
            .map(|msg| truncate_chars(msg.trim_end(), LONGEST_MESSAGE_DISPLAY_CHARS))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
