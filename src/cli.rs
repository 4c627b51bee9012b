use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = "orz-cli", author, version, about = "ORZ CLI tooling", long_about = None)]
pub struct Cli {
    /// Directory holding the Jira config and API token
    #[clap(long, global = true, env = "ORZ_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Say hello to someone
    Hello(HelloArgs),

    /// Setup the CLI tool and configure required settings
    Setup(SetupArgs),

    /// Create a Jira ticket with the specified details
    CreateJiraTicket(CreateJiraTicketArgs),

    /// Create a GitHub pull request with current branch changes
    GhPullRequest(GhPullRequestArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HelloArgs {
    /// Name to greet
    #[clap(default_value = "World")]
    pub name: String,

    /// Output in uppercase
    #[clap(short, long, default_value_t = false)]
    pub uppercase: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SetupArgs {
    /// Force setup even if configuration already exists
    #[clap(short, long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateJiraTicketArgs {
    /// Jira project key
    #[clap(short, long)]
    pub project: Option<String>,

    /// Issue summary
    #[clap(short, long)]
    pub summary: Option<String>,

    /// Issue description
    #[clap(short, long)]
    pub description: Option<String>,

    /// Issue type (e.g., Bug, Task, Story)
    #[clap(short = 't', long = "type")]
    pub issue_type: Option<String>,

    /// Comma-separated list of labels
    #[clap(short, long)]
    pub labels: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequestArgs {
    /// Create a Jira ticket for this PR
    #[clap(short, long, default_value_t = false)]
    pub jira: bool,

    /// Jira project key
    #[clap(long, value_name = "JIRA_PROJECT")]
    pub jira_project: Option<String>,

    /// Jira issue type
    #[clap(long, value_name = "JIRA_TYPE")]
    pub jira_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("orz-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_hello_defaults_to_world() {
        match parse(&["hello"]).command {
            Some(Command::Hello(args)) => {
                assert_eq!(args.name, "World");
                assert!(!args.uppercase);
            }
            other => panic!("unexpected {other:?}"),
        }

        match parse(&["hello", "Alice", "-u"]).command {
            Some(Command::Hello(args)) => {
                assert_eq!(args.name, "Alice");
                assert!(args.uppercase);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_create_jira_ticket_flags() {
        let cli = parse(&[
            "create-jira-ticket",
            "-p",
            "PROJ",
            "-s",
            "Summary",
            "-d",
            "Description",
            "-t",
            "Bug",
            "-l",
            "a, b",
        ]);

        assert_eq!(
            cli.command.map(|c| match c {
                Command::CreateJiraTicket(args) => args,
                other => panic!("unexpected {other:?}"),
            }),
            Some(CreateJiraTicketArgs {
                project: Some("PROJ".into()),
                summary: Some("Summary".into()),
                description: Some("Description".into()),
                issue_type: Some("Bug".into()),
                labels: Some("a, b".into()),
            })
        );
    }

    #[test]
    fn test_gh_pull_request_flags_and_globals() {
        let cli = parse(&[
            "gh-pull-request",
            "--jira",
            "--jira-project",
            "OPS",
            "--jira-type",
            "Task",
            "--data-dir",
            "/tmp/orz",
            "-vv",
        ]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/orz")));
        match cli.command {
            Some(Command::GhPullRequest(args)) => {
                assert!(args.jira);
                assert_eq!(args.jira_project.as_deref(), Some("OPS"));
                assert_eq!(args.jira_type.as_deref(), Some("Task"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_setup_force() {
        match parse(&["setup", "-f"]).command {
            Some(Command::Setup(args)) => assert!(args.force),
            other => panic!("unexpected {other:?}"),
        }
    }
}
