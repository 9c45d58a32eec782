// src/analyzer.rs

use crate::diff::diff_against_parent;
use crate::error::Result;
use crate::model::*;
use crate::repository::RepositoryHandle;
use indicatif::ProgressBar;
use tracing::info;

pub fn analyze(handle: &RepositoryHandle, commits: &[Commit]) -> Result<ActivityInsights> {
    analyze_with_progress(handle, commits, &ProgressBar::hidden())
}

/// Same as [`analyze`], ticking `bar` once per processed commit.
pub fn analyze_with_progress(
    handle: &RepositoryHandle,
    commits: &[Commit],
    bar: &ProgressBar,
) -> Result<ActivityInsights> {
    if commits.is_empty() {
        return Ok(ActivityInsights::default());
    }

    bar.set_length(commits.len() as u64);
    bar.set_message("Analyzing commits");

    let mut per_day: CountMap<_> = CountMap::new();
    let mut per_author: CountMap<String> = CountMap::new();
    let mut per_file: CountMap<String> = CountMap::new();
    let mut longest: Option<&str> = None;

    for commit in commits {
        *per_day.entry(commit.local_date()).or_default() += 1;
        *per_author.entry(commit.author.clone()).or_default() += 1;

        // Root commits have no parent to diff against and add nothing here
        for change in diff_against_parent(handle, commit)? {
            *per_file.entry(change.path).or_default() += 1;
        }

        if longest.map_or(true, |m| commit.message.chars().count() > m.chars().count()) {
            longest = Some(commit.message.as_str());
        }

        bar.inc(1);
    }
    bar.finish_with_message("Analysis complete");

    let insights = ActivityInsights {
        total_commits: commits.len(),
        busiest_day: top_entry(&per_day),
        most_active_author: top_entry(&per_author),
        top_modified_file: top_entry(&per_file),
        commits_per_day: per_day,
        commits_per_author: per_author,
        changes_per_file: per_file,
        longest_message: longest.map(String::from),
        first_commit: commits.iter().map(|c| c.time).min(),
        last_commit: commits.iter().map(|c| c.time).max(),
    };
    info!(
        "Analyzed {} commits: {} days, {} authors, {} files",
        insights.total_commits,
        insights.commits_per_day.len(),
        insights.commits_per_author.len(),
        insights.changes_per_file.len()
    );
    Ok(insights)
}

/// Entry with the highest count; the first such key in map order wins ties.
fn top_entry<K: Clone + Ord>(counts: &CountMap<K>) -> Option<(K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((key, count));
        }
    }
    best.map(|(k, n)| (k.clone(), n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_entry_of_empty_map_is_none() {
        let counts: CountMap<String> = CountMap::new();
        assert_eq!(top_entry(&counts), None);
    }

    #[test]
    fn top_entry_picks_a_maximal_element() {
        let mut counts = CountMap::new();
        counts.insert("b".to_string(), 3);
        counts.insert("a".to_string(), 1);
        counts.insert("c".to_string(), 3);

        let (key, count) = top_entry(&counts).unwrap();
        assert_eq!(count, 3);
        assert!(key == "b" || key == "c");
    }
}
