use issuebook_lib::{Issue, Status};
use serde::{Deserialize, Serialize};

/// Issue with counts for list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub id: String,
    pub request_number: String,
    pub title: String,
    pub requester: String,
    pub status: Status,
    pub start_date: String,
    pub task_count: usize,
    pub attachment_count: usize,
    pub total_hours: f64,
    pub selected: bool,
}

impl IssueSummary {
    #[must_use]
    pub fn new(issue: &Issue, selected: bool) -> Self {
        Self {
            id: issue.id.clone(),
            request_number: issue.request_number.clone(),
            title: issue.title.clone(),
            requester: issue.requester.clone(),
            status: issue.status,
            start_date: issue.start_date.clone(),
            task_count: issue.tasks.len(),
            attachment_count: issue.attachments.len(),
            total_hours: issue.total_duration_hours(),
            selected,
        }
    }
}

/// Issue with derived totals for the show view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueDetails {
    #[serde(flatten)]
    pub issue: Issue,
    pub total_hours: f64,
    pub selected: bool,
}

/// Result of a mutating command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub changed: bool,
}

impl MutationResult {
    #[must_use]
    pub fn new(action: &str, id: Option<&str>, changed: bool) -> Self {
        Self {
            action: action.to_string(),
            id: id.map(str::to_string),
            changed,
        }
    }
}
