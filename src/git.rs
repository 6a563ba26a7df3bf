//! src/git.rs

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// The name+email pair commits are attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Narrow seam over the local version-control tooling, so the orchestration
/// logic can run against a fake in tests.
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// The identity the local configuration attributes commits to, or
    /// `None` when no usable name/email is configured.
    async fn current_identity(&self) -> Result<Option<Identity>>;

    /// Subject lines of commits authored by `identity` today, across all
    /// refs of the repository at `repo`. Query failures degrade to an
    /// empty list; one broken repository must not abort the whole run.
    async fn commits_for_today(&self, repo: &Path, identity: &Identity) -> Vec<String>;
}

/// Shells out to the `git` binary.
pub struct GitCli;

pub async fn run_git_command(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .context("Failed to execute git command")?;

    if output.status.success() {
        Ok(String::from_utf8(output.stdout).context("Failed to parse git command output")?)
    } else {
        let stderr = String::from_utf8(output.stderr)
            .unwrap_or_else(|_| "Could not read stderr".to_string());
        Err(anyhow!(
            "Git command failed with status {}:\n{}",
            output.status,
            stderr
        ))
    }
}

/// Inclusive bounds of the local calendar day, formatted for `--since` /
/// `--until`.
fn day_window(date: NaiveDate) -> (String, String) {
    let day = date.format("%Y-%m-%d");
    (format!("{day} 00:00:00"), format!("{day} 23:59:59"))
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl VcsClient for GitCli {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        let name = run_git_command(&["config", "user.name"])
            .await
            .ok()
            .and_then(non_empty);
        let email = run_git_command(&["config", "user.email"])
            .await
            .ok()
            .and_then(non_empty);

        Ok(match (name, email) {
            (Some(name), Some(email)) => Some(Identity { name, email }),
            _ => None,
        })
    }

    async fn commits_for_today(&self, repo: &Path, identity: &Identity) -> Vec<String> {
        // The window is computed per repository, at query time. A run that
        // crosses local midnight can therefore filter different
        // repositories against different days.
        let (since, until) = day_window(Local::now().date_naive());
        let repo_arg = repo.display().to_string();
        let author = identity.to_string();
        let args = [
            "-C",
            repo_arg.as_str(),
            "log",
            "--all",
            "--since",
            since.as_str(),
            "--until",
            until.as_str(),
            "--author",
            author.as_str(),
            "--pretty=format:%s",
        ];

        match run_git_command(&args).await {
            Ok(log) => log
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(String::from)
                .collect(),
            Err(err) => {
                log::debug!("skipping {}: {err:#}", repo.display());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_renders_as_name_and_email() {
        let identity = Identity {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        };
        assert_eq!(identity.to_string(), "Test User <test@example.com>");
    }

    #[test]
    fn day_window_covers_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (since, until) = day_window(date);
        assert_eq!(since, "2025-03-14 00:00:00");
        assert_eq!(until, "2025-03-14 23:59:59");
    }

    #[test]
    fn blank_config_values_count_as_unconfigured() {
        assert_eq!(non_empty("  \n".to_string()), None);
        assert_eq!(non_empty("Test User\n".to_string()), Some("Test User".to_string()));
    }
}
