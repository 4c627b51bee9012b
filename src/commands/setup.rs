//! `orz-cli setup`

use crate::app::AppContext;
use crate::cli::SetupArgs;
use crate::error::Result;
use crate::github;
use crate::jira::setup::{setup_jira, SetupOutcome};
use crate::output;
use crate::shell::CommandRunner;
use crate::ui::Prompter;

pub fn execute(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    runner: &mut dyn CommandRunner,
    args: &SetupArgs,
) -> Result<()> {
    output::step("Setting up the CLI tool...");

    ctx.paths.ensure_data_dir();

    let outcome = setup_jira(
        &ctx.config_store(),
        &ctx.secret_store(),
        &ctx.http,
        prompter,
        args.force,
    )?;
    if outcome == SetupOutcome::KeptExisting {
        return Ok(());
    }

    github::check_github_cli(runner);

    output::success("Setup completed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JiraConfig;
    use crate::paths::AppPaths;
    use crate::request::HttpClient;
    use crate::shell::ScriptedRunner;
    use crate::ui::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_data_dir_and_config() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path().join("data"), tmp.path());
        let ctx = AppContext::new(paths, HttpClient::new().unwrap());

        let mut prompter = ScriptedPrompter::new([
            Answer::Text("dev@example.com".into()),
            Answer::Text("http://127.0.0.1:1".into()),
            Answer::Text("APP".into()),
            Answer::Password("token".into()),
        ]);
        let mut runner = ScriptedRunner::new().without_program("gh");

        execute(&ctx, &mut prompter, &mut runner, &SetupArgs { force: false }).unwrap();

        assert!(ctx.paths.data_dir.is_dir());
        let config: JiraConfig = ctx.config_store().load().unwrap();
        assert_eq!(config.default_project_key, "APP");
        assert_eq!(config.account_id, "");
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_force_skips_update_confirmation() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::new(tmp.path(), tmp.path());
        let ctx = AppContext::new(paths, HttpClient::new().unwrap());
        ctx.config_store().save(&JiraConfig::default()).unwrap();

        let mut prompter = ScriptedPrompter::new([
            Answer::Text("dev".into()),
            Answer::Text("http://127.0.0.1:1".into()),
            Answer::Text("OPS".into()),
            Answer::Password("token".into()),
        ]);
        let mut runner = ScriptedRunner::new();

        execute(&ctx, &mut prompter, &mut runner, &SetupArgs { force: true }).unwrap();

        assert!(prompter
            .find("Jira configuration already exists. Update it?")
            .is_none());
        assert_eq!(ctx.config_store().load().unwrap().default_project_key, "OPS");
    }
}
