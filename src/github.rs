use std::process::Command;

use serde::Deserialize;

use crate::config::GitHubSettings;
use crate::error::{Error, Result};

/// Operations the run needs from the source control host
pub trait SourceControl: Sync {
    /// Messages of every commit in the pull request, oldest first
    fn list_pull_request_commit_messages(&self, pr_number: u64) -> Result<Vec<String>>;

    /// Post a comment on the pull request conversation
    fn publish_comment(&self, pr_number: u64, body: &str) -> Result<()>;
}

// Response types for the REST endpoints

#[derive(Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

/// GitHub client that talks to the REST API through the GitHub CLI
///
/// The token is handed to `gh` through `GH_TOKEN`, so no prior
/// `gh auth login` is needed on the runner.
pub struct GitHubClient {
    token: String,
    repository: String,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Self {
        Self {
            token: settings.token.clone(),
            repository: settings.repository.clone(),
        }
    }

    fn gh_api(&self, args: &[&str]) -> Result<Vec<u8>> {
        tracing::debug!(?args, "gh api");

        let output = Command::new("gh")
            .arg("api")
            .args(args)
            .env("GH_TOKEN", &self.token)
            .output()
            .map_err(|e| Error::GitHubCli(format!("Failed to execute gh command: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitHubCli(stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }
}

impl SourceControl for GitHubClient {
    fn list_pull_request_commit_messages(&self, pr_number: u64) -> Result<Vec<String>> {
        let path = format!(
            "repos/{}/pulls/{}/commits?per_page=100",
            self.repository, pr_number
        );
        let stdout = self.gh_api(&["--paginate", &path])?;

        parse_commit_pages(&stdout)
    }

    fn publish_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        let path = format!("repos/{}/issues/{}/comments", self.repository, pr_number);
        let field = format!("body={}", body);

        self.gh_api(&["--method", "POST", &path, "-f", &field])?;
        Ok(())
    }
}

/// Parse `gh api --paginate` output, which is one JSON array per page
/// written back to back
fn parse_commit_pages(stdout: &[u8]) -> Result<Vec<String>> {
    let mut messages = Vec::new();

    for page in serde_json::Deserializer::from_slice(stdout).into_iter::<Vec<CommitEntry>>() {
        messages.extend(page?.into_iter().map(|entry| entry.commit.message));
    }

    Ok(messages)
}

/// In-memory source control host for tests
#[cfg(test)]
pub mod fake {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct FakeSourceControl {
        messages: Option<Vec<String>>,
        comments: Mutex<Vec<(u64, String)>>,
    }

    impl FakeSourceControl {
        pub fn with_commits(messages: &[&str]) -> Self {
            Self {
                messages: Some(messages.iter().map(|m| m.to_string()).collect()),
                ..Self::default()
            }
        }

        /// Fails to list commits
        pub fn unreachable() -> Self {
            Self::default()
        }

        pub fn comments(&self) -> Vec<(u64, String)> {
            self.comments.lock().unwrap().clone()
        }
    }

    impl SourceControl for FakeSourceControl {
        fn list_pull_request_commit_messages(&self, _pr_number: u64) -> Result<Vec<String>> {
            self.messages
                .clone()
                .ok_or_else(|| Error::GitHubCli("HTTP 502: Bad Gateway".into()))
        }

        fn publish_comment(&self, pr_number: u64, body: &str) -> Result<()> {
            self.comments
                .lock()
                .unwrap()
                .push((pr_number, body.to_string()));
            Ok(())
        }
    }
}
