//! Read-only wrappers used by `--dry-run`
//!
//! Reads are forwarded to the wrapped client; every mutating call is logged
//! and reported as successful without being sent.

use chrono::NaiveDate;
use colored::Colorize;

use crate::error::Result;
use crate::github::SourceControl;
use crate::issue::{Issue, Transition, Version};
use crate::jira::IssueTracker;

pub struct DryRun<T> {
    inner: T,
}

impl<T> DryRun<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

fn skipped(action: String) {
    println!("{} {}", "~".yellow(), action);
    tracing::info!(dry_run = true, "skipped: {}", action);
}

impl<T: IssueTracker> IssueTracker for DryRun<T> {
    fn get_issue(&self, key: &str) -> Result<Issue> {
        self.inner.get_issue(key)
    }

    fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        self.inner.get_transitions(key)
    }

    fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        skipped(format!("apply transition {} to {}", transition_id, key));
        Ok(())
    }

    fn get_latest_version(&self) -> Result<Option<Version>> {
        self.inner.get_latest_version()
    }

    fn create_version(&self, name: &str, start_date: NaiveDate) -> Result<Version> {
        skipped(format!("create version {} starting {}", name, start_date));
        Ok(Version {
            id: format!("dry-run-{}", name),
            name: name.to_string(),
            released: false,
        })
    }

    fn release_version(&self, version_id: &str, release_date: NaiveDate) -> Result<()> {
        skipped(format!("release version {} on {}", version_id, release_date));
        Ok(())
    }

    fn set_fix_version(&self, key: &str, version_name: &str) -> Result<()> {
        skipped(format!("set fix version {} on {}", version_name, key));
        Ok(())
    }
}

impl<T: SourceControl> SourceControl for DryRun<T> {
    fn list_pull_request_commit_messages(&self, pr_number: u64) -> Result<Vec<String>> {
        self.inner.list_pull_request_commit_messages(pr_number)
    }

    fn publish_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        skipped(format!("comment on #{}:\n{}", pr_number, body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeSourceControl;
    use crate::jira::fake::FakeTracker;

    #[test]
    fn test_reads_pass_through_and_writes_are_dropped() {
        let tracker = DryRun::new(
            FakeTracker::new()
                .with_issue("PLY-1", "To Do", "First", &[("31", "Done")])
                .with_latest_version("10", "5", true),
        );

        assert_eq!(tracker.get_issue("PLY-1").unwrap().status, "To Do");
        assert_eq!(tracker.get_transitions("PLY-1").unwrap().len(), 1);

        tracker.apply_transition("PLY-1", "31").unwrap();
        tracker.set_fix_version("PLY-1", "6").unwrap();
        tracker.release_version("10", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).unwrap();
        let created = tracker
            .create_version("6", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .unwrap();

        assert_eq!(created.name, "6");
        assert!(tracker.inner.calls().is_empty());
        assert_eq!(tracker.inner.status_of("PLY-1"), "To Do");
        assert!(tracker.get_latest_version().unwrap().unwrap().released);
    }

    #[test]
    fn test_comment_is_not_published() {
        let github = DryRun::new(FakeSourceControl::with_commits(&["PLY-1"]));

        assert_eq!(github.list_pull_request_commit_messages(1).unwrap(), vec!["PLY-1"]);
        github.publish_comment(1, "hello").unwrap();
        assert!(github.inner.comments().is_empty());
    }
}
