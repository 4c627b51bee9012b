//! Jira REST v3 types
//!
//! Response types only carry the fields orz-cli reads. Request types map
//! one-to-one onto the JSON Jira expects for `POST /rest/api/3/issue`:
//!
//! ```text
//! CreateIssueRequest     -> { "fields": IssueFields }
//! IssueFields.project    -> { "key": "PROJ" }
//! IssueFields.issue_type -> "issuetype": { "id": "10001" }
//! IssueFields.description-> Atlassian Document Format, see Document
//! IssueFields.components -> [ { "name": "api" } ]
//! IssueFields.assignee   -> { "accountId": "..." }   (omitted when None)
//! IssueFields.parent     -> { "key": "PROJ-1" }      (omitted when None)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JiraIssueType {
    pub id: String,
    pub name: String,
}

/// `GET /rest/api/3/project/{key}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraProject {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub issue_types: Vec<JiraIssueType>,
}

/// `GET /rest/api/3/myself`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub account_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Response of `POST /rest/api/3/issue`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Everything needed to create an issue, after all prompting is done
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateIssueParams {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type_id: String,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub assignee_account_id: Option<String>,
    pub parent_key: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateIssueRequest {
    pub fields: IssueFields,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssueFields {
    pub project: KeyRef,
    pub summary: String,
    pub description: Document,
    #[serde(rename = "issuetype")]
    pub issue_type: IdRef,
    pub labels: Vec<String>,
    pub components: Vec<NameRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<AccountRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyRef>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct KeyRef {
    pub key: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IdRef {
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NameRef {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccountRef {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

impl From<CreateIssueParams> for CreateIssueRequest {
    fn from(params: CreateIssueParams) -> Self {
        Self {
            fields: IssueFields {
                project: KeyRef {
                    key: params.project_key,
                },
                summary: params.summary,
                description: Document::from_text(&params.description),
                issue_type: IdRef {
                    id: params.issue_type_id,
                },
                labels: params.labels,
                components: params
                    .components
                    .into_iter()
                    .map(|name| NameRef { name })
                    .collect(),
                assignee: params
                    .assignee_account_id
                    .map(|account_id| AccountRef { account_id }),
                parent: params.parent_key.map(|key| KeyRef { key }),
            },
        }
    }
}

/// Minimal Atlassian Document Format document
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub version: u8,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<Node>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

impl Document {
    /// Wrap plain text in a single paragraph
    ///
    /// Jira rejects empty text nodes, so empty text becomes an empty paragraph.
    pub fn from_text(text: &str) -> Self {
        let content = if text.is_empty() {
            vec![]
        } else {
            vec![Node {
                kind: "text".into(),
                text: Some(text.to_string()),
                content: vec![],
            }]
        };

        Self {
            version: 1,
            kind: "doc".into(),
            content: vec![Node {
                kind: "paragraph".into(),
                text: None,
                content,
            }],
        }
    }
}
