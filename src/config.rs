//! Run configuration
//!
//! Raw command line / action inputs are validated once here and turned into
//! immutable settings that the rest of the run only reads.

use std::path::Path;

use serde::Deserialize;

use crate::cli::Args;
use crate::error::{Error, Result};

/// What to do with the issues found in the pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Move each issue to the target status
    TransitionIssues,
    /// Attach the current project version as a fix version
    AssignFixVersion,
}

/// Options driving the issue pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target_status: String,
    /// Accepted issue key prefixes, never empty
    pub issue_prefixes: Vec<String>,
    /// Statuses to skip; always contains `target_status`
    pub ignored_statuses: Vec<String>,
    pub mode: Mode,
    pub release_version: bool,
    pub publish_comment: bool,
    pub initial_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    pub base_url: String,
    pub user_email: String,
    pub api_token: String,
    pub project_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    pub token: String,
    /// "owner/repo"
    pub repository: String,
    pub pr_number: u64,
}

/// Fully validated configuration for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub run: RunConfig,
    pub jira: JiraSettings,
    pub github: GitHubSettings,
    pub dry_run: bool,
}

#[derive(Deserialize)]
struct Event {
    pull_request: Option<EventPullRequest>,
}

#[derive(Deserialize)]
struct EventPullRequest {
    number: u64,
}

impl RunConfig {
    /// Build the pipeline options, adding the target status to the ignored ones
    pub fn new(
        target_status: impl Into<String>,
        issue_prefixes: Vec<String>,
        ignored_statuses: Vec<String>,
        mode: Mode,
    ) -> Self {
        let target_status = target_status.into();
        let mut ignored_statuses = ignored_statuses;
        if !ignored_statuses.contains(&target_status) {
            ignored_statuses.push(target_status.clone());
        }

        Self {
            target_status,
            issue_prefixes,
            ignored_statuses,
            mode,
            release_version: false,
            publish_comment: true,
            initial_version: None,
        }
    }

    pub fn is_ignored(&self, status: &str) -> bool {
        self.ignored_statuses.iter().any(|s| s == status)
    }
}

impl Settings {
    /// Validate the inputs before any remote call is made
    pub fn from_args(args: Args) -> Result<Self> {
        let target_status = required(args.target_status, "target-status")?;

        let issue_prefixes = split_list(args.issue_prefixes.as_deref());
        if issue_prefixes.is_empty() {
            return Err(Error::MissingInput("issue-prefixes"));
        }
        if let Some(bad) = issue_prefixes
            .iter()
            .find(|p| !p.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(Error::InvalidInput {
                name: "issue-prefixes",
                reason: format!("{:?} is not an alphanumeric prefix", bad),
            });
        }

        let mode = if flag(args.transition_issues, "transition-issues", true)? {
            Mode::TransitionIssues
        } else {
            Mode::AssignFixVersion
        };

        let mut run = RunConfig::new(
            target_status,
            issue_prefixes,
            split_list(args.ignored_statuses.as_deref()),
            mode,
        );
        run.release_version = flag(args.release_version, "release-version", false)?;
        run.publish_comment = flag(args.publish_comment, "publish-comment", true)?;
        run.initial_version = non_empty(args.initial_version);

        let jira = JiraSettings {
            base_url: required(args.jira_base_url, "jira-base-url")?
                .trim_end_matches('/')
                .to_string(),
            user_email: required(args.jira_user_email, "jira-user-email")?,
            api_token: required(args.jira_api_token, "jira-api-token")?,
            project_key: required(args.jira_project_key, "jira-project-key")?,
        };

        let repository = required(args.repository, "repository")?;
        if repository.split('/').filter(|part| !part.is_empty()).count() != 2 {
            return Err(Error::InvalidInput {
                name: "repository",
                reason: format!("expected \"owner/repo\", got {:?}", repository),
            });
        }

        let pr_number = match non_empty(args.pr_number) {
            Some(number) => number.parse().map_err(|_| Error::InvalidInput {
                name: "pr-number",
                reason: format!("{:?} is not a pull request number", number),
            })?,
            None => match args.event_path.as_deref() {
                Some(path) => pr_number_from_event(path)?,
                None => return Err(Error::MissingInput("pr-number")),
            },
        };

        let github = GitHubSettings {
            token: required(args.github_token, "github-token")?,
            repository,
            pr_number,
        };

        Ok(Self {
            run,
            jira,
            github,
            dry_run: flag(args.dry_run, "dry-run", false)?,
        })
    }
}

/// Read the pull request number from a workflow event payload
fn pr_number_from_event(path: &Path) -> Result<u64> {
    let contents = std::fs::read_to_string(path)?;
    let event: Event = serde_json::from_str(&contents)?;

    event
        .pull_request
        .map(|pr| pr.number)
        .ok_or(Error::MissingInput("pr-number"))
}

fn required(value: Option<String>, name: &'static str) -> Result<String> {
    non_empty(value).ok_or(Error::MissingInput(name))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean input; a blank or missing value takes `default`
fn flag(value: Option<String>, name: &'static str, default: bool) -> Result<bool> {
    let Some(value) = non_empty(value) else {
        return Ok(default);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(Error::InvalidInput {
            name,
            reason: format!("{:?} is not a boolean", value),
        }),
    }
}

/// Split a comma-separated input, dropping blanks
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
