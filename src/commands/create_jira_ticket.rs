//! `orz-cli create-jira-ticket`

use crate::app::AppContext;
use crate::cli::CreateJiraTicketArgs;
use crate::error::{Error, Result};
use crate::jira::{create_jira_ticket, CreateJiraTicketParams, JiraTicket};
use crate::ui::{Input, Prompter};

/// Split `"a, b,,c"` into `["a", "b", "c"]`
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn execute(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    args: &CreateJiraTicketArgs,
) -> Result<JiraTicket> {
    let config = ctx.config_store().load()?;

    let summary = match args.summary.as_deref().filter(|s| !s.is_empty()) {
        Some(summary) => summary.to_string(),
        None => prompter.input(&Input::new("Enter issue summary:").required())?,
    };

    let description = match args.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => description.to_string(),
        None => prompter.input(&Input::new("Enter issue description:").with_default(&summary))?,
    };

    let client = ctx.jira_client(&config)?;
    let params = CreateJiraTicketParams {
        summary,
        description: Some(description),
        project_key: args
            .project
            .clone()
            .or_else(|| Some(config.default_project_key.clone())),
        issue_type: args.issue_type.clone(),
        labels: args.labels.as_deref().map(parse_labels),
    };

    create_jira_ticket(&config, &client, prompter, params)?.ok_or(Error::TicketNotCreated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Choice, JiraConfig};
    use crate::paths::AppPaths;
    use crate::request::HttpClient;
    use crate::secrets::JIRA_API_TOKEN;
    use crate::ui::{Answer, PromptKind, ScriptedPrompter};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_partial_json, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        rt: tokio::runtime::Runtime,
        server: MockServer,
        ctx: AppContext,
        _tmp: TempDir,
    }

    impl Harness {
        /// Jira with projects that have Story, Task and Bug, and an issue
        /// endpoint that always creates TEST-123
        fn new() -> Self {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let server = rt.block_on(MockServer::start());
            rt.block_on(async {
                Mock::given(method("GET"))
                    .and(path_regex(r"^/rest/api/3/project/[A-Z]+$"))
                    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                        "id": "10000",
                        "key": "TEST",
                        "name": "Test Project",
                        "issueTypes": [
                            {"id": "10001", "name": "Story"},
                            {"id": "10002", "name": "Task"},
                            {"id": "10003", "name": "Bug"}
                        ]
                    })))
                    .mount(&server)
                    .await;
            });

            let tmp = TempDir::new().unwrap();
            let ctx = AppContext::new(
                AppPaths::new(tmp.path(), tmp.path()),
                HttpClient::new().unwrap(),
            );
            ctx.config_store()
                .save(&JiraConfig {
                    username: "testuser".into(),
                    url: server.uri(),
                    default_project_key: "TEST".into(),
                    supported_issue_types: vec!["Story".into(), "Task".into(), "Bug".into()],
                    parent_epic_choices: vec![Choice::new("Test Epic", "TEST-1")],
                    parent_story_choices: vec![Choice::new("Test Story", "TEST-2")],
                    account_id: "test-account-id".into(),
                    ..JiraConfig::default()
                })
                .unwrap();
            ctx.secret_store().set(JIRA_API_TOKEN, "test-api-token").unwrap();

            Self {
                rt,
                server,
                ctx,
                _tmp: tmp,
            }
        }

        /// Expect exactly one issue creation whose body contains `fields`
        fn expect_issue(&self, fields: serde_json::Value) {
            self.rt.block_on(
                Mock::given(method("POST"))
                    .and(path("/rest/api/3/issue"))
                    .and(body_partial_json(json!({ "fields": fields })))
                    .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                        "id": "123",
                        "key": "TEST-123",
                        "self": "https://jira.example.com/rest/api/3/issue/123"
                    })))
                    .expect(1)
                    .mount(&self.server),
            );
        }

        fn run(&self, prompter: &mut ScriptedPrompter, args: CreateJiraTicketArgs) -> Result<JiraTicket> {
            execute(&self.ctx, prompter, &args)
        }
    }

    fn args(summary: Option<&str>, description: Option<&str>, issue_type: Option<&str>) -> CreateJiraTicketArgs {
        CreateJiraTicketArgs {
            project: None,
            summary: summary.map(str::to_string),
            description: description.map(str::to_string),
            issue_type: issue_type.map(str::to_string),
            labels: None,
        }
    }

    #[test]
    fn test_parse_labels_trims() {
        assert_eq!(parse_labels("a, b"), vec!["a", "b"]);
        assert_eq!(parse_labels(" frontend ,, backend "), vec!["frontend", "backend"]);
        assert!(parse_labels("").is_empty());
    }

    #[test]
    fn test_creates_ticket_with_all_options() {
        let h = Harness::new();
        h.expect_issue(json!({
            "project": {"key": "PROJ"},
            "summary": "Test Issue Summary",
            "issuetype": {"id": "10003"},
            "labels": ["frontend", "bug"],
            "parent": {"key": "TEST-1"},
            "assignee": {"accountId": "test-account-id"}
        }));

        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        let ticket = h
            .run(
                &mut prompter,
                CreateJiraTicketArgs {
                    project: Some("PROJ".into()),
                    labels: Some("frontend,bug".into()),
                    ..args(Some("Test Issue Summary"), Some("Test Issue Description"), Some("Bug"))
                },
            )
            .unwrap();

        assert_eq!(ticket.key, "TEST-123");
        assert_eq!(ticket.url, format!("{}/browse/TEST-123", h.server.uri()));
    }

    #[test]
    fn test_uses_default_project_key() {
        let h = Harness::new();
        h.expect_issue(json!({
            "project": {"key": "TEST"},
            "summary": "Test Issue Summary",
            "issuetype": {"id": "10003"}
        }));

        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        let ticket = h.run(
            &mut prompter,
            args(Some("Test Issue Summary"), Some("Test Issue Description"), Some("Bug")),
        );

        assert!(ticket.is_ok());
    }

    #[test]
    fn test_prompts_for_summary() {
        let h = Harness::new();
        h.expect_issue(json!({"summary": "Prompted Summary", "issuetype": {"id": "10001"}}));

        let mut prompter = ScriptedPrompter::new([
            Answer::Text("Prompted Summary".into()),
            Answer::Default,
        ]);
        h.run(&mut prompter, args(None, Some("Test Issue Description"), Some("Story")))
            .unwrap();

        let asked = prompter.find("Enter issue summary:").unwrap();
        assert_eq!(asked.kind, PromptKind::Input);
        assert!(asked.required);
    }

    #[test]
    fn test_prompts_for_description_defaulting_to_summary() {
        let h = Harness::new();
        h.expect_issue(json!({
            "description": {
                "content": [{"content": [{"type": "text", "text": "Test Issue Summary"}]}]
            }
        }));

        let mut prompter = ScriptedPrompter::new([Answer::Text(String::new()), Answer::Default]);
        h.run(&mut prompter, args(Some("Test Issue Summary"), None, Some("Bug")))
            .unwrap();

        let asked = prompter.find("Enter issue description:").unwrap();
        assert_eq!(asked.default.as_deref(), Some("Test Issue Summary"));
        assert!(!asked.required);
    }

    #[test]
    fn test_empty_description_flag_prompts() {
        let h = Harness::new();
        h.expect_issue(json!({
            "description": {
                "content": [{"content": [{"type": "text", "text": "Test Issue Summary"}]}]
            }
        }));

        let mut prompter = ScriptedPrompter::new([Answer::Default, Answer::Default]);
        h.run(&mut prompter, args(Some("Test Issue Summary"), Some(""), Some("Bug")))
            .unwrap();

        assert!(prompter.find("Enter issue description:").is_some());
    }

    #[test]
    fn test_labels_are_trimmed() {
        let h = Harness::new();
        h.expect_issue(json!({"labels": ["frontend", "backend", "critical"]}));

        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        h.run(
            &mut prompter,
            CreateJiraTicketArgs {
                labels: Some("frontend, backend, critical".into()),
                ..args(Some("Summary"), Some("Description"), Some("Task"))
            },
        )
        .unwrap();
    }

    #[test]
    fn test_prompts_for_issue_type() {
        let h = Harness::new();
        h.expect_issue(json!({"issuetype": {"id": "10002"}}));

        let mut prompter =
            ScriptedPrompter::new([Answer::Select("Task".into()), Answer::Default]);
        h.run(&mut prompter, args(Some("Summary"), Some("Description"), None))
            .unwrap();

        let asked = prompter.find("Select issue type:").unwrap();
        assert_eq!(asked.choices, vec!["Story", "Task", "Bug"]);
    }

    #[test]
    fn test_rejected_issue_is_reported_as_failure() {
        let h = Harness::new();
        h.rt.block_on(
            Mock::given(method("POST"))
                .and(path("/rest/api/3/issue"))
                .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
                .mount(&h.server),
        );

        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        let err = h
            .run(&mut prompter, args(Some("Summary"), Some("Description"), Some("Bug")))
            .unwrap_err();

        assert!(matches!(err, Error::TicketNotCreated));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let ctx = AppContext::new(
            AppPaths::new(tmp.path(), tmp.path()),
            HttpClient::new().unwrap(),
        );

        let mut prompter = ScriptedPrompter::default();
        let err = execute(&ctx, &mut prompter, &args(Some("Summary"), None, None)).unwrap_err();

        assert!(matches!(err, Error::ConfigMissing(_)));
        assert!(prompter.asked().is_empty());
    }
}
