//! Jira integration
//!
//! This module provides the issue tracker side of a run:
//! - Reading issues and their currently available transitions
//! - Moving issues through a workflow transition
//! - Finding, creating and releasing project versions
//! - Attaching a fix version to issues
//!
//! Requests go to the Jira Cloud REST API (`<base-url>/rest/api/3`) and are
//! authenticated with basic auth built from the user email and API token.

use std::time::Duration;

use base64::Engine;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::JiraSettings;
use crate::error::{Error, Result};
use crate::issue::{Issue, Transition, Version};
use crate::version::format_date;

const API_PATH: &str = "rest/api/3";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the run needs from the issue tracker
pub trait IssueTracker: Sync {
    fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Transitions available on the issue right now
    fn get_transitions(&self, key: &str) -> Result<Vec<Transition>>;

    fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()>;

    /// The most recent project version by sequence, if the project has any
    fn get_latest_version(&self) -> Result<Option<Version>>;

    fn create_version(&self, name: &str, start_date: NaiveDate) -> Result<Version>;

    fn release_version(&self, version_id: &str, release_date: NaiveDate) -> Result<()>;

    fn set_fix_version(&self, key: &str, version_name: &str) -> Result<()>;
}

/// Link to the issue in the Jira web UI
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

// Response types for the REST endpoints

#[derive(Deserialize)]
struct IssueResponse {
    key: String,
    fields: IssueFields,
}

#[derive(Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    status: Status,
}

#[derive(Deserialize)]
struct Status {
    name: String,
}

#[derive(Deserialize)]
struct Transitions {
    transitions: Vec<Transition>,
}

#[derive(Deserialize)]
struct Page<T> {
    values: Vec<T>,
}

#[derive(Deserialize)]
struct Project {
    id: String,
}

impl From<IssueResponse> for Issue {
    fn from(response: IssueResponse) -> Self {
        Issue {
            key: response.key,
            status: response.fields.status.name,
            summary: response.fields.summary,
        }
    }
}

/// Blocking Jira REST client bound to one project
pub struct JiraClient {
    agent: ureq::Agent,
    api_url: String,
    authorization: String,
    project_key: String,
}

impl JiraClient {
    pub fn new(settings: &JiraSettings) -> Self {
        let credentials = format!("{}:{}", settings.user_email, settings.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);

        Self {
            agent: ureq::AgentBuilder::new().timeout(TIMEOUT).build(),
            api_url: format!("{}/{}", settings.base_url.trim_end_matches('/'), API_PATH),
            authorization: format!("Basic {}", encoded),
            project_key: settings.project_key.clone(),
        }
    }

    fn send(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<ureq::Response> {
        let url = format!("{}/{}", self.api_url, path);
        tracing::debug!(%method, %url, "jira request");

        let request = self
            .agent
            .request(method, &url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json");

        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match response {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => Err(Error::JiraStatus {
                method,
                path: path.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(err) => Err(Error::JiraTransport {
                method,
                path: path.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send("GET", path, None)?;
        Ok(response.into_json()?)
    }

    fn project_id(&self) -> Result<String> {
        let project: Project = self.get(&format!("project/{}", self.project_key))?;
        Ok(project.id)
    }
}

impl IssueTracker for JiraClient {
    fn get_issue(&self, key: &str) -> Result<Issue> {
        let response: IssueResponse = self.get(&format!("issue/{}?fields=summary,status", key))?;
        Ok(response.into())
    }

    fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let response: Transitions = self.get(&format!("issue/{}/transitions", key))?;
        Ok(response.transitions)
    }

    fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let body = transition_body(transition_id);
        self.send("POST", &format!("issue/{}/transitions", key), Some(body))?;
        Ok(())
    }

    fn get_latest_version(&self) -> Result<Option<Version>> {
        let path = format!(
            "project/{}/version?orderBy=-sequence&maxResults=1",
            self.project_key
        );
        tracing::info!(project = %self.project_key, "fetching the latest version");

        let page: Page<Version> = self.get(&path)?;
        Ok(page.values.into_iter().next())
    }

    fn create_version(&self, name: &str, start_date: NaiveDate) -> Result<Version> {
        let body = create_version_body(name, start_date, &self.project_id()?);

        let response = self.send("POST", "version", Some(body))?;
        Ok(response.into_json()?)
    }

    fn release_version(&self, version_id: &str, release_date: NaiveDate) -> Result<()> {
        let body = release_version_body(release_date);
        self.send("PUT", &format!("version/{}", version_id), Some(body))?;
        Ok(())
    }

    fn set_fix_version(&self, key: &str, version_name: &str) -> Result<()> {
        let body = fix_version_body(version_name);
        self.send("PUT", &format!("issue/{}", key), Some(body))?;
        Ok(())
    }
}

// Request bodies

fn transition_body(transition_id: &str) -> Value {
    json!({ "transition": { "id": transition_id } })
}

fn create_version_body(name: &str, start_date: NaiveDate, project_id: &str) -> Value {
    json!({
        "name": name,
        "startDate": format_date(start_date),
        "projectId": project_id,
    })
}

fn release_version_body(release_date: NaiveDate) -> Value {
    json!({
        "released": true,
        "releaseDate": format_date(release_date),
    })
}

fn fix_version_body(version_name: &str) -> Value {
    json!({
        "update": {
            "fixVersions": [{ "add": { "name": version_name } }]
        }
    })
}
