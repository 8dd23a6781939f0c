use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid input {name}: {reason}")]
    InvalidInput { name: &'static str, reason: String },

    #[error("Jira request {method} {path} failed with status {status}: {body}")]
    JiraStatus {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Jira request {method} {path} failed: {reason}")]
    JiraTransport {
        method: &'static str,
        path: String,
        reason: String,
    },

    #[error("GitHub CLI error: {0}")]
    GitHubCli(String),

    #[error("Project has no versions and no initial version name was configured")]
    NoInitialVersion,

    #[error("Cannot derive next version from non-numeric version name: {0:?}")]
    NonNumericVersion(String),

    #[error("Version {0:?} is too large to increment")]
    VersionOverflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
