//! Jira integration for orz-cli
//!
//! This module provides:
//! - An authenticated client for the Jira Cloud REST v3 API
//! - The interactive ticket creation flow shared by `create-jira-ticket` and
//!   `gh-pull-request --jira`
//! - The Jira part of `orz-cli setup`
//!
//! # Storage
//!
//! Non-secret settings live in `jira_config.json` (see [`crate::config`]),
//! the API token in `jira_api_token.txt` (see [`crate::secrets`]).

pub mod client;
pub mod setup;
pub mod ticket;
pub mod types;

use lazy_static::lazy_static;
use regex::Regex;

pub use client::JiraClient;
pub use ticket::{create_jira_ticket, CreateJiraTicketParams, JiraTicket};

lazy_static! {
    static ref PROJECT_KEY: Regex = Regex::new(r"^(?i)[a-z][a-z0-9_]+$").unwrap();
    static ref ISSUE_KEY: Regex = Regex::new(r"\b[A-Z][A-Z0-9_]+-\d+\b").unwrap();
}

/// Validator for project key input (e.g. `PROJ`)
pub fn validate_project_key(key: &str) -> Result<(), String> {
    if PROJECT_KEY.is_match(key.trim()) {
        Ok(())
    } else {
        Err("This does not look like a valid Jira project key (e.g. PROJ)".into())
    }
}

/// Normalize a project key the way Jira stores it
pub fn normalize_project_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Find an issue key of `project` (e.g. `PROJ-123` for `PROJ`) in free text
///
/// Keys of other projects are ignored, so `UTF-8` or `HTTP-2` never count.
pub fn find_issue_key<'a>(text: &'a str, project: &str) -> Option<&'a str> {
    let project = normalize_project_key(project);
    if project.is_empty() {
        return None;
    }
    ISSUE_KEY
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|key| key.split_once('-').is_some_and(|(prefix, _)| prefix == project))
}
