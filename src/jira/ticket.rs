//! Interactive Jira ticket creation
//!
//! Fills whatever the caller did not provide by asking the user, then submits
//! the issue:
//!
//! project key -> issue types -> issue type -> parent (story or epic) -> create

use crate::config::{Choice, JiraConfig};
use crate::error::{Error, Result};
use crate::jira::client::JiraClient;
use crate::jira::types::{CreateIssueParams, JiraIssueType};
use crate::jira::validate_project_key;
use crate::output;
use crate::ui::{Input, Prompter};

/// Issue type that must be created under a parent story
const SUB_TASK: &str = "Sub-task";

/// What the caller already knows about the ticket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateJiraTicketParams {
    pub summary: String,
    pub description: Option<String>,
    pub project_key: Option<String>,
    pub issue_type: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// A created ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraTicket {
    pub key: String,
    pub url: String,
}

/// Create a ticket, prompting for anything missing
///
/// Returns `Ok(None)` when Jira refused the issue. Missing issue types, an
/// unknown `issue_type` or a sub-task without parent stories are errors.
pub fn create_jira_ticket(
    config: &JiraConfig,
    client: &JiraClient,
    prompter: &mut dyn Prompter,
    params: CreateJiraTicketParams,
) -> Result<Option<JiraTicket>> {
    let project_key = match params.project_key.filter(|key| !key.is_empty()) {
        Some(key) => key,
        None => prompter.input(
            &Input::new("Enter Jira project key:")
                .required()
                .with_validator(validate_project_key),
        )?,
    };

    output::step("Fetching issue types for project...");
    let issue_types = client.get_issue_types(&project_key);
    if issue_types.is_empty() {
        return Err(Error::NoIssueTypes(project_key));
    }

    let issue_type = match params.issue_type.as_deref() {
        Some(name) => find_issue_type(&issue_types, name)
            .cloned()
            .ok_or_else(|| Error::UnknownIssueType(name.to_string()))?,
        None => select_issue_type(prompter, config, &issue_types)?,
    };

    let parent_key = select_parent(prompter, config, &issue_type)?;

    output::step("Creating Jira ticket...");
    let created = client.create_issue(CreateIssueParams {
        project_key,
        summary: params.summary,
        description: params.description.unwrap_or_default(),
        issue_type_id: issue_type.id,
        labels: params.labels.unwrap_or_default(),
        components: vec![],
        assignee_account_id: config.assignee().map(str::to_string),
        parent_key,
    });

    let Some(issue) = created else {
        return Ok(None);
    };

    let url = client.issue_url(&issue.key);
    output::success(format!("Jira ticket created successfully! Key: {}", issue.key));
    output::field("URL", &url);

    Ok(Some(JiraTicket {
        key: issue.key,
        url,
    }))
}

/// Case-insensitive lookup by name
pub fn find_issue_type<'a>(types: &'a [JiraIssueType], name: &str) -> Option<&'a JiraIssueType> {
    types
        .iter()
        .find(|issue_type| issue_type.name.eq_ignore_ascii_case(name))
}

/// Issue types worth offering: those in `supported`, in Jira's order
///
/// Falls back to every type when none of them is supported, so the picker is
/// never empty.
pub fn issue_type_choices(types: &[JiraIssueType], supported: &[String]) -> Vec<Choice> {
    let offered: Vec<&JiraIssueType> = types
        .iter()
        .filter(|issue_type| supported.iter().any(|name| name == &issue_type.name))
        .collect();

    let offered = if offered.is_empty() {
        output::warn("None of the supported issue types exist in this project. Showing all.");
        types.iter().collect()
    } else {
        offered
    };

    offered
        .into_iter()
        .map(|issue_type| Choice::new(&issue_type.name, &issue_type.id))
        .collect()
}

fn select_issue_type(
    prompter: &mut dyn Prompter,
    config: &JiraConfig,
    types: &[JiraIssueType],
) -> Result<JiraIssueType> {
    let choices = issue_type_choices(types, &config.supported_issue_types);
    let selected = prompter.select("Select issue type:", &choices)?;

    Ok(JiraIssueType {
        id: selected.value,
        name: selected.name,
    })
}

fn select_parent(
    prompter: &mut dyn Prompter,
    config: &JiraConfig,
    issue_type: &JiraIssueType,
) -> Result<Option<String>> {
    if issue_type.name.eq_ignore_ascii_case(SUB_TASK) {
        if config.parent_story_choices.is_empty() {
            return Err(Error::NoParentStories);
        }
        let story = prompter.select("Select parent story:", &config.parent_story_choices)?;
        return Ok(Some(story.value));
    }

    if config.parent_epic_choices.is_empty() {
        return Ok(None);
    }
    let epic = prompter.select("Select parent epic:", &config.parent_epic_choices)?;
    Ok(Some(epic.value))
}
