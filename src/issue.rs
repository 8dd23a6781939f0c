//! Issue tracker records the run reads and updates.

use serde::Deserialize;

/// A Jira issue as far as the run is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// The issue key (e.g., "PLY-123")
    pub key: String,
    /// Name of the current workflow status (e.g., "In Review")
    pub status: String,
    /// The issue title
    pub summary: String,
}

/// A workflow transition currently available on one issue
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

/// A project version used as a fix version container
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub released: bool,
}

/// An issue paired with the transition that moves it to the target status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub issue: Issue,
    pub transition: Transition,
}

impl Issue {
    pub fn new(
        key: impl Into<String>,
        status: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            status: status.into(),
            summary: summary.into(),
        }
    }
}
