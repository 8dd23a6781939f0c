use chrono::{NaiveDate, Utc};
use colored::Colorize;
use rayon::prelude::*;

use crate::config::{Mode, RunConfig, Settings};
use crate::dry_run::DryRun;
use crate::error::Result;
use crate::github::{GitHubClient, SourceControl};
use crate::issue::{Issue, Version};
use crate::jira::{IssueTracker, JiraClient};
use crate::keys;
use crate::template;
use crate::transition;
use crate::version::{self, Decision};

/// What a run found and changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Issue keys referenced by the pull request commits
    pub keys: Vec<String>,
    /// Issues that were transitioned or got a fix version
    pub processed: Vec<Issue>,
    /// Version assigned or released during the run
    pub version: Option<Version>,
    pub commented: bool,
}

/// Main application entry point
pub fn run(args: crate::cli::Args) -> Result<()> {
    let settings = Settings::from_args(args)?;

    let jira = JiraClient::new(&settings.jira);
    let github = GitHubClient::new(&settings.github);
    let today = Utc::now().date_naive();

    let report = if settings.dry_run {
        println!("{} Dry run, no changes will be made", ">".bright_yellow());
        execute(&settings, &DryRun::new(jira), &DryRun::new(github), today)?
    } else {
        execute(&settings, &jira, &github, today)?
    };

    print_report(&settings.run, &report);
    Ok(())
}

/// Run the issue pipeline for one pull request
///
/// Fetches the PR commits, finds the issues they reference and either moves
/// them to the target status or assigns them a fix version. Any failed remote
/// call aborts the run; changes already made are left in place.
pub fn execute(
    settings: &Settings,
    tracker: &dyn IssueTracker,
    source: &dyn SourceControl,
    today: NaiveDate,
) -> Result<RunReport> {
    let config = &settings.run;
    let pr_number = settings.github.pr_number;
    let mut report = RunReport::default();

    let messages = source.list_pull_request_commit_messages(pr_number)?;
    tracing::info!(pr = pr_number, count = messages.len(), "fetched commit messages");

    report.keys = keys::extract_from_vec(&messages, &config.issue_prefixes);
    if report.keys.is_empty() {
        println!(
            "{} Commit messages don't contain any issue keys",
            ">".bright_green()
        );
        return Ok(report);
    }

    println!(
        "{} Found issue keys: {}",
        ">".bright_green(),
        report.keys.join(", ").bright_cyan()
    );

    let issues = fetch_issues(tracker, &report.keys)?;
    let candidates = filter_ignored(config, issues);
    let resolved = transition::resolve_all(tracker, candidates, &config.target_status)?;

    if resolved.is_empty() {
        println!("{} No issues need updating", ">".bright_green());
        return Ok(report);
    }

    match config.mode {
        Mode::TransitionIssues => {
            for item in &resolved {
                tracker.apply_transition(&item.issue.key, &item.transition.id)?;
                println!(
                    "{} Moved {} to {}",
                    "+".bright_green(),
                    item.issue.key.bright_cyan(),
                    config.target_status
                );
            }
            report.processed = resolved.into_iter().map(|item| item.issue).collect();

            if config.publish_comment {
                let body = template::make_comment(
                    &settings.jira.base_url,
                    &config.target_status,
                    &report.processed,
                );
                source.publish_comment(pr_number, &body)?;
                report.commented = true;
            }
        }
        Mode::AssignFixVersion => {
            let version = resolve_version(tracker, config, today)?;
            for item in &resolved {
                tracker.set_fix_version(&item.issue.key, &version.name)?;
                println!(
                    "{} Added {} to version {}",
                    "+".bright_green(),
                    item.issue.key.bright_cyan(),
                    version.name
                );
            }
            report.processed = resolved.into_iter().map(|item| item.issue).collect();
            report.version = Some(version);
        }
    }

    if config.release_version {
        let version = match report.version.take() {
            Some(version) => version,
            None => resolve_version(tracker, config, today)?,
        };

        tracker.release_version(&version.id, today)?;
        println!(
            "{} Released version {}",
            "+".bright_green(),
            version.name.bright_cyan()
        );
        report.version = Some(Version {
            released: true,
            ..version
        });
    }

    Ok(report)
}

/// Fetch every issue in parallel; the first failure aborts the batch
fn fetch_issues(tracker: &dyn IssueTracker, keys: &[String]) -> Result<Vec<Issue>> {
    keys.par_iter().map(|key| tracker.get_issue(key)).collect()
}

/// Drop issues whose status is ignored, including ones already at the target
fn filter_ignored(config: &RunConfig, issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| {
            if config.is_ignored(&issue.status) {
                tracing::info!(issue = %issue.key, status = %issue.status, "skipping ignored status");
                false
            } else {
                true
            }
        })
        .collect()
}

/// Find the version to use this run, creating it when needed
fn resolve_version(
    tracker: &dyn IssueTracker,
    config: &RunConfig,
    today: NaiveDate,
) -> Result<Version> {
    let latest = tracker.get_latest_version()?;

    match version::decide(latest.as_ref(), config.initial_version.as_deref(), today)? {
        Decision::Reuse(version) => {
            println!(
                "{} Reusing an existing version: {}",
                ">".bright_green(),
                version.name.bright_cyan()
            );
            Ok(version)
        }
        Decision::Create { name, start_date } => {
            println!(
                "{} Creating a new version: {}",
                ">".bright_green(),
                name.bright_cyan()
            );
            tracker.create_version(&name, start_date)
        }
    }
}

fn print_report(config: &RunConfig, report: &RunReport) {
    if report.processed.is_empty() {
        return;
    }

    let action = match config.mode {
        Mode::TransitionIssues => format!("moved to {}", config.target_status),
        Mode::AssignFixVersion => "assigned a fix version".to_string(),
    };
    println!(
        "{} {} issue(s) {}",
        ">".bright_green(),
        report.processed.len(),
        action
    );
}
