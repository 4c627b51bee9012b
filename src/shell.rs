//! Running external programs
//!
//! `git` and `gh` are always invoked through a [`CommandRunner`] so the pull
//! request flow can be exercised without a repository or network.

use std::collections::HashMap;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

pub trait CommandRunner {
    /// Run `program` and capture its stdout. A non-zero exit is an error.
    fn output(&mut self, program: &str, args: &[&str]) -> Result<String>;

    /// Run `program` attached to the terminal. A non-zero exit is an error.
    fn interactive(&mut self, program: &str, args: &[&str]) -> Result<()>;

    /// Whether `program` can be found on `PATH`
    fn exists(&mut self, program: &str) -> bool;
}

/// Render a command line for messages
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs real processes in the current working directory
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&mut self, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        tracing::debug!(command = %line, "running");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Command {
                command: line.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Command {
                command: line,
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn interactive(&mut self, program: &str, args: &[&str]) -> Result<()> {
        let line = command_line(program, args);
        tracing::debug!(command = %line, "running attached");

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| Error::Command {
                command: line.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::Command {
                command: line,
                message: format!("exited with {status}"),
            });
        }
        Ok(())
    }

    fn exists(&mut self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Replays canned results and records every invocation
///
/// Commands without a scripted result succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    results: HashMap<String, std::result::Result<String, String>>,
    missing: Vec<String>,
    calls: Vec<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` (a full command line) print `stdout`
    pub fn with_output(mut self, command: &str, stdout: &str) -> Self {
        self.results.insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Make `command` fail with `message`
    pub fn with_failure(mut self, command: &str, message: &str) -> Self {
        self.results
            .insert(command.to_string(), Err(message.to_string()));
        self
    }

    /// Pretend `program` is not installed
    pub fn without_program(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn ran(&self, command: &str) -> bool {
        self.calls.iter().any(|call| call == command)
    }

    fn run(&mut self, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        self.calls.push(line.clone());

        match self.results.get(&line) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err(message)) => Err(Error::Command {
                command: line,
                message: message.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn output(&mut self, program: &str, args: &[&str]) -> Result<String> {
        self.run(program, args)
    }

    fn interactive(&mut self, program: &str, args: &[&str]) -> Result<()> {
        self.run(program, args).map(|_| ())
    }

    fn exists(&mut self, program: &str) -> bool {
        !self.missing.iter().any(|missing| missing == program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line("git", &["log", "main..feat", "--format=%s"]),
            "git log main..feat --format=%s"
        );
    }

    #[test]
    fn test_scripted_runner_replays_results() {
        let mut runner = ScriptedRunner::new()
            .with_output("git branch --show-current", "feat\n")
            .with_failure("git push -u origin feat", "rejected")
            .without_program("gh");

        assert_eq!(runner.output("git", &["branch", "--show-current"]).unwrap(), "feat\n");
        assert!(runner.interactive("git", &["push", "-u", "origin", "feat"]).is_err());
        assert_eq!(runner.output("git", &["status"]).unwrap(), "");
        assert!(!runner.exists("gh"));
        assert!(runner.exists("git"));
        assert_eq!(runner.calls().len(), 3);
        assert!(runner.ran("git status"));
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let mut runner = SystemRunner;
        assert!(!runner.exists("orz-cli-definitely-not-installed"));
        let err = runner
            .output("orz-cli-definitely-not-installed", &[])
            .unwrap_err();
        assert!(matches!(err, Error::Command { .. }));
    }
}
