//! # orz-cli
//!
//! Developer workflow helper: one-time Jira setup, Jira ticket creation and
//! GitHub pull requests that can carry a freshly created ticket key.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod jira;
pub mod output;
pub mod paths;
pub mod request;
pub mod secrets;
pub mod shell;
pub mod ui;

// Re-export commonly used types
pub use config::{ConfigStore, JiraConfig};
pub use error::{Error, Result};
pub use jira::{JiraClient, JiraTicket};
