//! `orz-cli gh-pull-request`
//!
//! Shows the branch diff, pushes the branch, optionally files a Jira ticket
//! and hands over to `gh pr create`.

use crate::app::AppContext;
use crate::cli::GhPullRequestArgs;
use crate::error::{Error, Result};
use crate::git;
use crate::github;
use crate::jira::{create_jira_ticket, find_issue_key, CreateJiraTicketParams, JiraTicket};
use crate::output;
use crate::shell::CommandRunner;
use crate::ui::Prompter;

pub fn execute(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    runner: &mut dyn CommandRunner,
    args: &GhPullRequestArgs,
) -> Result<()> {
    github::require_github_cli(runner)?;

    let branch = git::current_branch(runner)?;
    let config = ctx.config_store().load()?;

    if branch == config.main_branch {
        return Err(Error::OnMainBranch(branch));
    }

    git::show_diff_with_main_branch(runner, &config.main_branch);

    if !github::confirm_pr_creation(prompter)? {
        output::info("PR creation cancelled");
        return Ok(());
    }

    git::push_branch_to_remote(runner, &branch)?;

    let mut title = git::first_commit_message(runner, &config.main_branch, &branch)?;
    tracing::debug!(%branch, %title, "pull request title from first commit");

    let mut ticket: Option<JiraTicket> = None;
    let project_key = args
        .jira_project
        .clone()
        .unwrap_or_else(|| config.default_project_key.clone());

    if should_create_jira_ticket(prompter, args, &title, &project_key)? {
        let params = CreateJiraTicketParams {
            summary: title.clone(),
            description: None,
            project_key: Some(project_key),
            issue_type: args.jira_type.clone(),
            labels: None,
        };

        let client = ctx.jira_client(&config)?;
        match create_jira_ticket(&config, &client, prompter, params)? {
            Some(created) => {
                title = format!("{title} [{}]", created.key);
                ticket = Some(created);
            }
            None => output::warn("Failed to create Jira ticket. Continuing with PR creation..."),
        }
    }

    let use_title = github::confirm_pr_title(prompter, &title)?;
    github::create_pull_request(runner, &ctx.paths, use_title.then_some(title.as_str()))?;

    output::success("Pull request created successfully!");
    if let Some(ticket) = ticket {
        output::field("Jira URL", &ticket.url);
    }
    Ok(())
}

/// `--jira` forces a ticket. Otherwise a title that already names an issue of
/// `project_key` needs none, and anything else is up to the user.
fn should_create_jira_ticket(
    prompter: &mut dyn Prompter,
    args: &GhPullRequestArgs,
    title: &str,
    project_key: &str,
) -> Result<bool> {
    if args.jira {
        return Ok(true);
    }
    if let Some(key) = find_issue_key(title, project_key) {
        output::info(format!("Commit message already references {key}; skipping Jira ticket"));
        return Ok(false);
    }
    prompter.confirm("Create a Jira ticket for this PR?", true)
}
