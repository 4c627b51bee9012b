use crate::error::{Error, Result};
use crate::output;
use crate::paths::AppPaths;
use crate::shell::CommandRunner;
use crate::ui::Prompter;

const GH: &str = "gh";

/// Name `gh pr create --template` expects, relative to `.github/`
const PR_TEMPLATE: &str = "pull_request_template.md";

/// Check that the GitHub CLI is installed, warning the user if it is not
pub fn check_github_cli(runner: &mut dyn CommandRunner) -> bool {
    let installed = runner.exists(GH);
    if !installed {
        output::warn("GitHub CLI (gh) is not installed or not in your PATH.");
        output::warn("Please install it from https://cli.github.com/ to use GitHub-related features.");
    }
    installed
}

/// Like [`check_github_cli`], but a missing `gh` is an error
pub fn require_github_cli(runner: &mut dyn CommandRunner) -> Result<()> {
    if check_github_cli(runner) {
        Ok(())
    } else {
        Err(Error::MissingCommand(GH.into()))
    }
}

/// Ask whether to go ahead after showing the diff
pub fn confirm_pr_creation(prompter: &mut dyn Prompter) -> Result<bool> {
    prompter.confirm("Continue with creating PR?", true)
}

/// Ask whether `title` should be used as the PR title
pub fn confirm_pr_title(prompter: &mut dyn Prompter, title: &str) -> Result<bool> {
    prompter.confirm(&format!("Do you want to use \"{title}\" as the PR title?"), true)
}

/// Arguments for `gh`
///
/// Without a title `gh` asks for one itself.
pub fn pr_create_args(title: Option<&str>, with_template: bool) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "create".to_string()];
    if let Some(title) = title.filter(|title| !title.is_empty()) {
        args.push("--title".into());
        args.push(title.into());
    }
    if with_template {
        args.push("--template".into());
        args.push(PR_TEMPLATE.into());
    }
    args
}

/// Open a pull request for the current branch with `gh pr create`
///
/// The project's `.github/pull_request_template.md` is used when present.
pub fn create_pull_request(
    runner: &mut dyn CommandRunner,
    paths: &AppPaths,
    title: Option<&str>,
) -> Result<()> {
    let with_template = paths.pr_template_path().exists();
    let args = pr_create_args(title, with_template);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    output::step("Creating GitHub pull request...");
    runner.interactive(GH, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use crate::ui::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_pr_create_args() {
        assert_eq!(pr_create_args(None, false), vec!["pr", "create"]);
        assert_eq!(
            pr_create_args(Some("Fix login [APP-1]"), true),
            vec![
                "pr",
                "create",
                "--title",
                "Fix login [APP-1]",
                "--template",
                "pull_request_template.md"
            ]
        );
        assert_eq!(pr_create_args(Some(""), false), vec!["pr", "create"]);
    }

    #[test]
    fn test_require_github_cli() {
        let mut runner = ScriptedRunner::new().without_program("gh");
        let err = require_github_cli(&mut runner).unwrap_err();
        assert!(matches!(err, Error::MissingCommand(cmd) if cmd == "gh"));

        let mut runner = ScriptedRunner::new();
        assert!(require_github_cli(&mut runner).is_ok());
    }

    #[test]
    fn test_create_pull_request_uses_template_when_present() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path().join("data"), tmp.path());
        std::fs::create_dir_all(tmp.path().join(".github")).unwrap();
        std::fs::write(paths.pr_template_path(), "## Summary\n").unwrap();

        let mut runner = ScriptedRunner::new();
        create_pull_request(&mut runner, &paths, Some("Add login")).unwrap();

        assert_eq!(
            runner.calls(),
            ["gh pr create --title Add login --template pull_request_template.md"]
        );
    }

    #[test]
    fn test_confirm_pr_title_message() {
        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        assert!(confirm_pr_title(&mut prompter, "Add login").unwrap());
        assert!(prompter
            .find("Do you want to use \"Add login\" as the PR title?")
            .is_some());
    }
}
