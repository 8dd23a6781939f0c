//! # jira-sync
//!
//! CI step that moves Jira issues referenced in pull request commits to a
//! target status, or attaches them to the current fix version.

pub mod app;
pub mod cli;
pub mod config;
pub mod dry_run;
pub mod error;
pub mod github;
pub mod issue;
pub mod jira;
pub mod keys;
pub mod template;
pub mod transition;
pub mod version;

// Re-export commonly used types
pub use config::{RunConfig, Settings};
pub use error::{Error, Result};
pub use issue::{Issue, Transition, Version};
