// src/export.rs

use crate::error::Result;
use crate::model::Commit;
use serde::Serialize;

const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One quoted line per commit, abbreviated ids
    Csv,
    /// Pretty-printed array with full ids
    Json,
}

#[derive(Serialize)]
struct ExportRecord<'a> {
    author: &'a str,
    message: &'a str,
    date: String,
    #[serde(rename = "commitId")]
    commit_id: &'a str,
}

pub fn export(commits: &[Commit], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(commits)),
        ExportFormat::Json => to_json(commits),
    }
}

/// `"author","summary","yyyy-MM-dd HH:mm","abcd1234"` per line, no header.
pub fn to_csv(commits: &[Commit]) -> String {
    let mut out = String::new();
    for commit in commits {
        let date = commit.time.format(CSV_DATE_FORMAT).to_string();
        let fields = [
            commit.author.as_str(),
            commit.summary.as_str(),
            date.as_str(),
            commit.short_id(),
        ];
        let line: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn to_json(commits: &[Commit]) -> Result<String> {
    let records: Vec<ExportRecord<'_>> = commits
        .iter()
        .map(|c| ExportRecord {
            author: &c.author,
            message: &c.summary,
            date: c.time.to_rfc3339(),
            commit_id: &c.id,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
