//! Filesystem locations used by orz-cli
//!
//! Everything is resolved once in `main` and passed down as an [`AppPaths`]
//! value. Nothing here is computed lazily or cached in globals.

use std::path::{Path, PathBuf};

use crate::output;

/// The name of the package, used for data directory naming
pub const PKG_NAME: &str = "orz-cli";

/// Files or directories that mark the root of a project
const ROOT_INDICATORS: [&str; 2] = [".git", ".github"];

/// Resolved locations for a single invocation
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `jira_config.json` and secrets
    pub data_dir: PathBuf,
    /// Root of the project the command was started in
    pub project_root: PathBuf,
}

impl AppPaths {
    /// Resolve paths for this process
    ///
    /// `data_dir_override` comes from `--data-dir` / `ORZ_DATA_DIR`. Without it
    /// the platform data directory is used (e.g. `~/.local/share/orz-cli`).
    pub fn resolve(data_dir_override: Option<PathBuf>) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let data_dir = data_dir_override.unwrap_or_else(|| default_data_dir(&cwd));

        Ok(Self {
            data_dir,
            project_root: find_project_root(&cwd),
        })
    }

    pub fn new(data_dir: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            project_root: project_root.into(),
        }
    }

    /// Path of the Jira config file
    pub fn jira_config_path(&self) -> PathBuf {
        self.data_dir.join("jira_config.json")
    }

    /// Path of the pull request template, if the project would have one
    pub fn pr_template_path(&self) -> PathBuf {
        self.project_root
            .join(".github")
            .join("pull_request_template.md")
    }

    /// Create the data directory if it doesn't exist. Failures are reported,
    /// not returned.
    pub fn ensure_data_dir(&self) -> bool {
        match std::fs::create_dir_all(&self.data_dir) {
            Ok(()) => {
                output::success(format!(
                    "Created data directory at {}",
                    self.data_dir.display()
                ));
                true
            }
            Err(err) => {
                output::fail(format!(
                    "Failed to create directory at {}: {}",
                    self.data_dir.display(),
                    err
                ));
                false
            }
        }
    }
}

fn default_data_dir(cwd: &Path) -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(PKG_NAME),
        None => {
            tracing::warn!("no platform data directory, falling back to working directory");
            cwd.join(format!(".{PKG_NAME}"))
        }
    }
}

/// Walk up from `start` until a directory containing `.git` or `.github` is found
///
/// Returns `start` itself when no ancestor qualifies.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| ROOT_INDICATORS.iter().any(|marker| dir.join(marker).exists()))
        .unwrap_or(start)
        .to_path_buf()
}
