use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Jira config not found at {}. Please run `orz-cli setup` to create a config.", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Jira credentials not found. Please run `orz-cli setup` first.")]
    CredentialsMissing,

    #[error("Required command not found: {0}")]
    MissingCommand(String),

    #[error("You are working on the {0} branch. Please checkout a new branch before creating a pull request.")]
    OnMainBranch(String),

    #[error("No commits found between {base} and {branch}")]
    NoCommits { base: String, branch: String },

    #[error("No issue types found for project {0}. Check project key.")]
    NoIssueTypes(String),

    #[error("Issue type {0} not found.")]
    UnknownIssueType(String),

    #[error("No parent stories found.")]
    NoParentStories,

    #[error("Failed to create Jira ticket")]
    TicketNotCreated,

    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("User cancelled operation")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl Error {
    /// Process exit status for this error. Every fatal failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, Error>;
