//! Authenticated Jira REST client
//!
//! Every call degrades to `None` or an empty list on failure. The failure is
//! already reported by [`HttpClient::send`], so callers only decide whether
//! to abort.

use base64::Engine;
use serde::de::DeserializeOwned;

use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::jira::types::{
    CreateIssueParams, CreateIssueRequest, CreatedIssue, JiraIssueType, JiraProject, JiraUser,
};
use crate::request::{HttpClient, Request};
use crate::secrets::{SecretStore, JIRA_API_TOKEN};

/// `Basic base64(username:token)`
pub fn basic_auth(username: &str, api_token: &str) -> String {
    let credentials = format!("{username}:{api_token}");
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credentials)
    )
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    http: HttpClient,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    pub fn new(http: HttpClient, base_url: &str, username: &str, api_token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: basic_auth(username, api_token),
        }
    }

    /// Build a client from the stored config and API token
    pub fn from_config(config: &JiraConfig, secrets: &SecretStore, http: HttpClient) -> Result<Self> {
        let token = secrets.get(JIRA_API_TOKEN).filter(|token| !token.is_empty());

        match token {
            Some(token) if !config.username.is_empty() && !config.url.is_empty() => {
                Ok(Self::new(http, &config.url, &config.username, &token))
            }
            _ => Err(Error::CredentialsMissing),
        }
    }

    /// Browser URL of an issue
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }

    /// Create an issue, returning its key on success
    pub fn create_issue(&self, params: CreateIssueParams) -> Option<CreatedIssue> {
        let body = match serde_json::to_value(CreateIssueRequest::from(params)) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(%err, "failed to encode issue");
                return None;
            }
        };

        self.http.send(
            Request::post(self.endpoint("/rest/api/3/issue"))
                .with_body(body)
                .with_header("Authorization", &self.auth_header),
        )
    }

    /// Issue types available in a project, empty when the project can't be read
    pub fn get_issue_types(&self, project_key: &str) -> Vec<JiraIssueType> {
        self.get_project(project_key)
            .map(|project| project.issue_types)
            .unwrap_or_default()
    }

    pub fn get_project(&self, project_key: &str) -> Option<JiraProject> {
        self.get(&format!("/rest/api/3/project/{project_key}"))
    }

    /// The user the API token belongs to
    pub fn get_current_user(&self) -> Option<JiraUser> {
        self.get("/rest/api/3/myself")
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        self.http.send(
            Request::get(self.endpoint(endpoint)).with_header("Authorization", &self.auth_header),
        )
    }

    fn endpoint(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
