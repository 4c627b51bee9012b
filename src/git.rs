//! Git helpers for the pull request flow

use crate::error::{Error, Result};
use crate::output;
use crate::shell::CommandRunner;

const REMOTE: &str = "origin";

/// Name of the checked out branch
pub fn current_branch(runner: &mut dyn CommandRunner) -> Result<String> {
    let branch = runner.output("git", &["branch", "--show-current"])?;
    let branch = branch.trim();
    if branch.is_empty() {
        return Err(Error::Command {
            command: "git branch --show-current".into(),
            message: "not on a branch (detached HEAD?)".into(),
        });
    }
    Ok(branch.to_string())
}

/// Print `git diff <main> --stat`
///
/// Only informational, so a failing diff is reported and otherwise ignored.
pub fn show_diff_with_main_branch(runner: &mut dyn CommandRunner, main_branch: &str) {
    output::step(format!("Showing diff with {main_branch} branch:"));
    println!("-------------------------------");
    if let Err(err) = runner.interactive("git", &["diff", main_branch, "--stat"]) {
        output::warn(err);
    }
    println!("-------------------------------");
}

/// Whether `branch` exists on the remote
pub fn has_remote_branch(runner: &mut dyn CommandRunner, branch: &str) -> Result<bool> {
    let refs = runner.output("git", &["ls-remote", "--heads", REMOTE, branch])?;
    Ok(!refs.trim().is_empty())
}

/// Push `branch` with upstream tracking unless the remote already has it
///
/// Returns whether a push happened.
pub fn push_branch_to_remote(runner: &mut dyn CommandRunner, branch: &str) -> Result<bool> {
    if has_remote_branch(runner, branch)? {
        return Ok(false);
    }

    output::step(format!("Pushing branch {branch} to remote..."));
    runner.interactive("git", &["push", "-u", REMOTE, branch])?;
    Ok(true)
}

/// Subject of the oldest commit on `branch` that is not on `main_branch`
pub fn first_commit_message(
    runner: &mut dyn CommandRunner,
    main_branch: &str,
    branch: &str,
) -> Result<String> {
    output::step("Extracting commit message for PR title...");
    let range = format!("{main_branch}..{branch}");
    let log = runner.output("git", &["log", &range, "--format=%s", "--reverse"])?;

    log.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::NoCommits {
            base: main_branch.to_string(),
            branch: branch.to_string(),
        })
}
