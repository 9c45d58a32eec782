// src/main.rs

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use git_activity::cli::{Args, Command};
use git_activity::{analyze_with_progress, diff_against_parent, discover, export, RepositoryHandle};
use indicatif::ProgressBar;
use std::fs;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    let start_time = Instant::now();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Total time: {:.2?}", start_time.elapsed());
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let root = discover(&args.path)?;
    let handle = RepositoryHandle::open(&root)?;
    info!("Using repository at {}", handle.root().path().display());

    match &args.command {
        Command::Branches => {
            let current = handle.head_branch()?;
            for name in handle.branches()? {
                let marker = if current.as_deref() == Some(name.as_str()) { "*" } else { " " };
                println!("{} {}", marker, name);
            }
        }
        Command::Log => {
            let branch = resolve_branch(&handle, args)?;
            for commit in handle.load_commits(&branch, args.limit)? {
                let marker = if commit.is_merge() { "M" } else { " " };
                println!(
                    "{} {} {} {:<20} {}",
                    commit.short_id(),
                    marker,
                    commit.time.format("%Y-%m-%d %H:%M"),
                    commit.author,
                    commit.summary
                );
            }
        }
        Command::Stats => {
            let branch = resolve_branch(&handle, args)?;
            let commits = handle.load_commits(&branch, args.limit)?;
            let started = Instant::now();
            let bar = ProgressBar::new(commits.len() as u64);
            let insights = analyze_with_progress(&handle, &commits, &bar)?;
            info!("Analysis finished in {:.2?}", started.elapsed());

            println!("Branch:              {}", branch);
            println!("Commits:             {}", insights.total_commits);
            if let (Some(first), Some(last)) = (insights.first_commit, insights.last_commit) {
                println!("Span:                {} .. {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"));
            }
            if let Some((author, count)) = &insights.most_active_author {
                println!("Most active author:  {} ({} commits)", author, count);
            }
            if let Some((day, count)) = &insights.busiest_day {
                println!("Busiest day:         {} ({} commits)", day, count);
            }
            if let Some((path, count)) = &insights.top_modified_file {
                println!("Top modified file:   {} ({} changes)", path, count);
            }
            if let Some(message) = insights.longest_message_display() {
                println!("Longest message:\n{}", message);
            }

            println!("\nCommits per author:");
            for (author, count) in &insights.commits_per_author {
                println!("  {:<30} {}", author, count);
            }
            println!("\nCommits per day:");
            for (day, count) in insights.daily_series() {
                println!("  {} {}", day, count);
            }
        }
        Command::Diff { rev } => {
            let commit = handle.find_commit(rev)?;
            for change in diff_against_parent(&handle, &commit)? {
                match &change.old_path {
                    Some(old) => println!("{}\t{} -> {}", change.kind, old, change.path),
                    None => println!("{}\t{}", change.kind, change.path),
                }
            }
        }
        Command::Export { format, output } => {
            let branch = resolve_branch(&handle, args)?;
            let commits = handle.load_commits(&branch, args.limit)?;
            let text = export(&commits, *format)?;
            match output {
                Some(path) => {
                    fs::write(path, text)
                        .with_context(|| format!("Failed to write export to {}", path.display()))?;
                    info!("Exported {} commits to {}", commits.len(), path.display());
                }
                None => print!("{}", text),
            }
        }
    }

    Ok(())
}

fn resolve_branch(handle: &RepositoryHandle, args: &Args) -> Result<String> {
    match &args.branch {
        Some(branch) => Ok(branch.clone()),
        None => handle
            .head_branch()?
            .ok_or_else(|| anyhow!("HEAD does not point at a branch; pass --branch")),
    }
}
