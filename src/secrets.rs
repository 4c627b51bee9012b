//! Storage for API tokens
//!
//! Each secret is a plain file `<data-dir>/<key>.txt` readable and writable by
//! the owner only.

use std::path::PathBuf;

use crate::error::Result;
use crate::output;
use crate::ui::Prompter;

/// Key of the Jira API token
pub const JIRA_API_TOKEN: &str = "jira_api_token";

/// Messages shown by [`SecretStore::setup_api_key`]
#[derive(Debug, Clone)]
pub struct SetupMessages {
    pub prompt: String,
    pub success: String,
    pub skip: String,
}

impl SetupMessages {
    /// Generic messages naming the key
    pub fn for_key(key: &str) -> Self {
        Self {
            prompt: format!("Enter your {key}:"),
            success: format!("{key} stored successfully (read-only)!"),
            skip: format!("No {key} provided. Skipping key setup."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecretStore {
    dir: PathBuf,
}

impl SecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }

    /// Read a secret, warning when it has not been set up
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        if !path.exists() {
            output::warn(format!("{key} not found. Please set it up first."));
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()),
            Err(err) => {
                output::fail(format!("Error reading {key}: {err}"));
                None
            }
        }
    }

    /// Write a secret and restrict it to the owner
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key);
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, value)?;
        restrict_permissions(&path)?;
        tracing::debug!(path = %path.display(), "stored secret");
        Ok(())
    }

    /// Interactively store a secret
    ///
    /// An existing secret is kept unless `force` is set or the user agrees to
    /// replace it. Returns whether a new value was written.
    pub fn setup_api_key(
        &self,
        prompter: &mut dyn Prompter,
        key: &str,
        force: bool,
        messages: &SetupMessages,
    ) -> Result<bool> {
        if self.exists(key) && !force {
            let update = prompter.confirm(&format!("{key} already exists. Update it?"), false)?;
            if !update {
                output::info(format!("Using existing {key}."));
                return Ok(false);
            }
        }

        let secret = prompter.password(&messages.prompt)?;
        if secret.is_empty() {
            output::warn(&messages.skip);
            return Ok(false);
        }

        if let Err(err) = self.set(key, &secret) {
            output::fail(format!("Failed to save {key}: {err}"));
            return Ok(false);
        }
        output::success(&messages.success);
        Ok(true)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}
