//! Jira part of `orz-cli setup`

use crate::config::{ConfigStore, JiraConfig};
use crate::error::Result;
use crate::jira::client::JiraClient;
use crate::jira::{normalize_project_key, validate_project_key};
use crate::output;
use crate::request::HttpClient;
use crate::secrets::{SecretStore, SetupMessages, JIRA_API_TOKEN};
use crate::ui::{Input, Prompter};

/// How setup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// New values were written
    Configured,
    /// The user chose to keep the existing configuration
    KeptExisting,
}

fn validate_url(url: &str) -> std::result::Result<(), String> {
    let url = url.trim();
    if (url.starts_with("https://") || url.starts_with("http://")) && url.len() > "https://".len() {
        Ok(())
    } else {
        Err("Enter the full URL, e.g. https://your-domain.atlassian.net".into())
    }
}

/// Ask for Jira credentials and settings and store them
pub fn setup_jira(
    store: &ConfigStore,
    secrets: &SecretStore,
    http: &HttpClient,
    prompter: &mut dyn Prompter,
    force: bool,
) -> Result<SetupOutcome> {
    output::step("Setting up Jira...");

    let mut config = if store.exists() && !force {
        let existing = store.migrate_if_incomplete()?;
        let update = prompter.confirm("Jira configuration already exists. Update it?", false)?;
        if !update {
            output::info("Using existing Jira configuration.");
            output::info(format!(
                "You can always update it manually in {}",
                store.path().display()
            ));
            return Ok(SetupOutcome::KeptExisting);
        }
        existing
    } else if store.exists() {
        // Forced: start over, but keep choices the user curated by hand
        match store.load() {
            Ok(existing) => existing,
            Err(err) => {
                output::warn(format!("Ignoring unreadable configuration: {err}"));
                JiraConfig::default()
            }
        }
    } else {
        JiraConfig::default()
    };

    let username = prompter.input(
        &Input::new("Enter your Jira username (email):")
            .required()
            .with_optional_default(&config.username),
    )?;
    let url = prompter.input(
        &Input::new("Enter your Jira URL (e.g., https://your-domain.atlassian.net):")
            .required()
            .with_validator(validate_url)
            .with_optional_default(&config.url),
    )?;
    let default_project_key = prompter.input(
        &Input::new("Enter your Jira default project key:")
            .required()
            .with_validator(validate_project_key)
            .with_optional_default(&config.default_project_key),
    )?;

    secrets.setup_api_key(
        prompter,
        JIRA_API_TOKEN,
        force,
        &SetupMessages {
            prompt: "Enter your Jira API token:".into(),
            success: "Jira API token stored successfully (read-only)!".into(),
            skip: "No Jira API token provided. Skipping token setup.".into(),
        },
    )?;

    config.username = username.trim().to_string();
    config.url = url.trim().trim_end_matches('/').to_string();
    config.default_project_key = normalize_project_key(&default_project_key);
    store.save(&config)?;

    match JiraClient::from_config(&config, secrets, http.clone()) {
        Ok(client) => match client.get_current_user() {
            Some(user) => {
                if let Some(name) = user.display_name.as_deref() {
                    output::field("Signed in as", name);
                }
                config.account_id = user.account_id;
                store.save(&config)?;
            }
            None => output::warn("Could not fetch your Jira account. Tickets will not be auto-assigned."),
        },
        Err(err) => output::warn(err),
    }

    output::success("Jira configuration stored successfully!");
    Ok(SetupOutcome::Configured)
}
