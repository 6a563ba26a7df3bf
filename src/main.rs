//! src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

mod cli;
mod config;
mod errors;
mod git;
mod llm;
mod scan;

use cli::Cli;
use config::Config;
use git::{GitCli, Identity, VcsClient};
use llm::DeepSeekClient;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = Config::from_env()?;

    let vcs = GitCli;
    let Some(identity) = vcs.current_identity().await? else {
        println!("{}", "Git user not configured".yellow());
        return Ok(());
    };

    let repos = scan::find_git_repos(&config.work_dir);
    let all_commits = collect_today_commits(&vcs, &identity, &repos).await;

    if all_commits.is_empty() {
        println!("{}", "No commits found for today".yellow());
        return Ok(());
    }

    let client =
        DeepSeekClient::new(&config).context("Failed to build the DeepSeek client.")?;

    println!("Generating daily report for commits {}", all_commits.len());
    let today = chrono::Local::now().date_naive();
    match llm::generate_daily_report(&client, &all_commits, today).await {
        Ok(report) => {
            println!("{report}");
            match write_report(&cli.output, &report).await {
                Ok(()) => println!("{}", format!("Report written to {}", cli.output.display()).green()),
                Err(err) => println!("{}", format!("Error generating report: {err:#}").red()),
            }
        }
        Err(err) => {
            println!("{}", format!("Error generating report: {err}").red());
        }
    }

    Ok(())
}

/// Queries each repository in discovery order and accumulates the tagged
/// commit lines, printing per-repository counts as they are found.
async fn collect_today_commits(
    vcs: &dyn VcsClient,
    identity: &Identity,
    repos: &[PathBuf],
) -> Vec<String> {
    let mut all_commits = Vec::new();
    for repo in repos {
        let commits = vcs.commits_for_today(repo, identity).await;
        println!("Found {} commits in {}", commits.len(), repo.display());
        all_commits.extend(commits.iter().map(|subject| tag_commit(repo, subject)));
    }
    all_commits
}

/// Tags a commit subject with its source repository, the exact shape the
/// report prompt expects.
fn tag_commit(repo: &Path, subject: &str) -> String {
    format!("repo:{}: commit:{}", repo.display(), subject)
}

async fn write_report(path: &Path, report: &str) -> Result<()> {
    tokio::fs::write(path, report)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
