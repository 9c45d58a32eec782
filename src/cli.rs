// src/cli.rs

use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory inside the git repository to inspect
    #[arg(short, long, env = "GIT_ACTIVITY_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Branch to read history from (defaults to the checked-out branch)
    #[arg(short, long, env = "GIT_ACTIVITY_BRANCH")]
    pub branch: Option<String>,

    /// Maximum number of commits to load
    #[arg(short = 'n', long, env = "GIT_ACTIVITY_LIMIT")]
    pub limit: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List local branches
    Branches,
    /// List commits, newest first
    Log,
    /// Per-day, per-author and per-file activity summary
    Stats,
    /// Files changed by a commit relative to its first parent
    Diff {
        /// Commit id, abbreviated id or revision expression
        rev: String,
    },
    /// Export the commit list
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
