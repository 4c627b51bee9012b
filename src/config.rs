//! Jira configuration for orz-cli
//!
//! The configuration lives in `<data-dir>/jira_config.json` as a single JSON
//! object with camelCase keys. Older files may be missing fields that were
//! added later; those are backfilled from [`JiraConfig::default`] on read.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::output;

/// A named option shown in a select prompt, e.g. a parent epic
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the user
    pub name: String,
    /// Value returned when selected (an issue key for parents)
    pub value: String,
}

impl Choice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Jira settings persisted by `orz-cli setup`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    /// Jira login, usually an email address
    pub username: String,
    /// Base URL of the Jira instance, without trailing slash
    pub url: String,
    /// Project used when no `--project` is given
    pub default_project_key: String,
    /// Issue types offered in the interactive picker
    pub supported_issue_types: Vec<String>,
    pub parent_epic_choices: Vec<Choice>,
    pub parent_story_choices: Vec<Choice>,
    /// Account id of the configured user, filled in by setup
    pub account_id: String,
    /// Assign created tickets to `account_id`
    pub auto_assign: bool,
    /// Trunk branch used as the diff and merge base
    pub main_branch: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            url: String::new(),
            default_project_key: String::new(),
            supported_issue_types: vec!["Story".into(), "Task".into(), "Sub-task".into()],
            parent_epic_choices: vec![
                Choice::new("My Epic", "PROJ-2"),
                Choice::new("My Epic 2", "PROJ-3"),
            ],
            parent_story_choices: vec![],
            account_id: String::new(),
            auto_assign: true,
            main_branch: "main".into(),
        }
    }
}

impl JiraConfig {
    /// Whether the account id is known and tickets should be assigned to it
    pub fn assignee(&self) -> Option<&str> {
        if self.auto_assign && !self.account_id.is_empty() {
            Some(&self.account_id)
        } else {
            None
        }
    }
}

/// Default config as a JSON object
fn default_object() -> Map<String, Value> {
    match serde_json::to_value(JiraConfig::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Fill fields missing from `existing` with their defaults
///
/// Keys present in `existing` win, including keys this version does not know
/// about. A `null` counts as missing.
pub fn merge_jira_config(existing: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = default_object();
    for (key, value) in existing.iter().filter(|(_, value)| !value.is_null()) {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Check that every default key is present and not null
pub fn is_config_complete(config: &Map<String, Value>) -> bool {
    default_object()
        .keys()
        .all(|key| config.get(key).is_some_and(|value| !value.is_null()))
}

/// Reads and writes `jira_config.json`
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config, backfilling missing fields
    ///
    /// A missing file is fatal: the caller is expected to report
    /// [`Error::ConfigMissing`], which tells the user to run setup.
    pub fn load(&self) -> Result<JiraConfig> {
        let raw = self.load_raw()?;
        let merged = merge_jira_config(&raw);
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Overwrite the config file with `config`
    pub fn save(&self, config: &JiraConfig) -> Result<()> {
        let contents = serde_json::to_string_pretty(config)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "saved jira config");
        Ok(())
    }

    /// Rewrite the file when it is missing fields, returning the usable config
    pub fn migrate_if_incomplete(&self) -> Result<JiraConfig> {
        let raw = self.load_raw()?;
        if is_config_complete(&raw) {
            return Ok(serde_json::from_value(Value::Object(raw))?);
        }

        output::warn("Existing Jira configuration is incomplete. Migrating automatically...");
        let merged = merge_jira_config(&raw);
        let config: JiraConfig = serde_json::from_value(Value::Object(merged))?;
        self.save(&config)?;
        Ok(config)
    }

    fn load_raw(&self) -> Result<Map<String, Value>> {
        if !self.exists() {
            return Err(Error::ConfigMissing(self.path.clone()));
        }

        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::InvalidInput(format!(
                "{} must contain a JSON object, found {}",
                self.path.display(),
                other
            ))),
        }
    }
}
