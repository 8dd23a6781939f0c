use std::path::PathBuf;

use clap::Parser;

/// Command line arguments
///
/// Every input falls back to the `INPUT_<NAME>` variable GitHub Actions sets
/// for action inputs, so the binary runs unchanged as an action step. The
/// runner may set an input to an empty string, so boolean and numeric inputs
/// are kept raw here and parsed in `config`, where blank means unset.
#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Workflow status the referenced issues should reach (e.g. "Done")
    #[clap(long, env = "INPUT_TARGET-STATUS")]
    pub target_status: Option<String>,

    /// Comma-separated issue key prefixes to act on (e.g. "PLY,OPS")
    #[clap(long, env = "INPUT_ISSUE-PREFIXES")]
    pub issue_prefixes: Option<String>,

    /// Comma-separated statuses whose issues are left alone
    #[clap(long, env = "INPUT_IGNORED-STATUSES")]
    pub ignored_statuses: Option<String>,

    /// Move issues to the target status; when false, assign a fix version instead [default: true]
    #[clap(long, env = "INPUT_TRANSITION-ISSUES")]
    pub transition_issues: Option<String>,

    /// Release the resolved version at the end of the run [default: false]
    #[clap(long, env = "INPUT_RELEASE-VERSION")]
    pub release_version: Option<String>,

    /// Comment on the pull request with the issues that were moved [default: true]
    #[clap(long, env = "INPUT_PUBLISH-COMMENT")]
    pub publish_comment: Option<String>,

    /// Version name to create when the project has no versions yet
    #[clap(long, env = "INPUT_INITIAL-VERSION")]
    pub initial_version: Option<String>,

    /// Read everything but only log the changes that would be made
    #[clap(short, long, env = "INPUT_DRY-RUN", num_args = 0..=1, default_missing_value = "true")]
    pub dry_run: Option<String>,

    #[clap(long, env = "INPUT_JIRA-BASE-URL")]
    pub jira_base_url: Option<String>,

    #[clap(long, env = "INPUT_JIRA-USER-EMAIL")]
    pub jira_user_email: Option<String>,

    #[clap(long, env = "INPUT_JIRA-API-TOKEN", hide_env_values = true)]
    pub jira_api_token: Option<String>,

    #[clap(long, env = "INPUT_JIRA-PROJECT-KEY")]
    pub jira_project_key: Option<String>,

    #[clap(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Pull request number; read from the event payload when omitted
    #[clap(long, env = "INPUT_PR-NUMBER")]
    pub pr_number: Option<String>,

    /// Repository as "owner/repo"
    #[clap(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Path to the webhook event payload of the workflow run
    #[clap(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}
