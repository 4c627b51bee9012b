use colored::Colorize;
use clap::CommandFactory;

use crate::cli::{Cli, Command};
use crate::commands;
use crate::config::{ConfigStore, JiraConfig};
use crate::error::Result;
use crate::jira::JiraClient;
use crate::paths::AppPaths;
use crate::request::HttpClient;
use crate::secrets::SecretStore;
use crate::shell::SystemRunner;
use crate::ui::InquirePrompter;

/// Everything a command needs that is decided once per process
#[derive(Debug, Clone)]
pub struct AppContext {
    pub paths: AppPaths,
    pub http: HttpClient,
}

impl AppContext {
    pub fn new(paths: AppPaths, http: HttpClient) -> Self {
        Self { paths, http }
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(self.paths.jira_config_path())
    }

    pub fn secret_store(&self) -> SecretStore {
        SecretStore::new(&self.paths.data_dir)
    }

    /// Build a Jira client from `config` and the stored API token
    pub fn jira_client(&self, config: &JiraConfig) -> Result<JiraClient> {
        JiraClient::from_config(config, &self.secret_store(), self.http.clone())
    }
}

/// Main application entry point
pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("{}", "Welcome to orz-cli CLI!".bright_green());
        println!("Run `orz-cli --help` to see available commands.");
        Cli::command().print_help()?;
        return Ok(());
    };

    let paths = AppPaths::resolve(cli.data_dir)?;
    tracing::debug!(
        data_dir = %paths.data_dir.display(),
        project_root = %paths.project_root.display(),
        "resolved paths"
    );
    let ctx = AppContext::new(paths, HttpClient::new()?);

    dispatch(&ctx, command)
}

/// Run `command` against the real terminal and real processes
fn dispatch(ctx: &AppContext, command: Command) -> Result<()> {
    let mut prompter = InquirePrompter::new();
    let mut runner = SystemRunner;

    match command {
        Command::Hello(args) => {
            commands::hello::execute(&args);
            Ok(())
        }
        Command::Setup(args) => commands::setup::execute(ctx, &mut prompter, &mut runner, &args),
        Command::CreateJiraTicket(args) => {
            commands::create_jira_ticket::execute(ctx, &mut prompter, &args).map(|_| ())
        }
        Command::GhPullRequest(args) => {
            commands::gh_pull_request::execute(ctx, &mut prompter, &mut runner, &args)
        }
    }
}
