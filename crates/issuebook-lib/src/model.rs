//! Core data types for issuebook-lib.
//!
//! Field names serialize in camelCase so a durable slot reads as
//! `{"issues": [...], "selectedIssueId": ...}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue workflow status. Transitions are free in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Progress,
    Done,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Progress => Self::Done,
            Self::Done => Self::Progress,
        }
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::IssuebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "progress" | "in_progress" | "inprogress" | "open" => Ok(Self::Progress),
            "done" | "closed" | "complete" => Ok(Self::Done),
            other => Err(crate::error::IssuebookError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A described reference to a photo or file attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,

    /// Free-form description.
    pub content: String,

    /// Original filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Base64 payload of the file, kept next to the filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl Attachment {
    #[must_use]
    pub fn from_new(id: String, new: NewAttachment) -> Self {
        Self {
            id,
            content: new.content,
            image: new.image,
            image_data: new.image_data,
        }
    }
}

/// One work-log entry on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    /// Free-form date text, conventionally `YYYY.MM.DD`.
    #[serde(default)]
    pub date: String,

    pub content: String,

    /// Referenced filenames, in the order they were added.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Hours spent, as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Task {
    /// Build a task, dropping repeated filenames from the initial list.
    #[must_use]
    pub fn from_new(id: String, new: NewTask) -> Self {
        let mut files = Vec::new();
        for file in new.files.unwrap_or_default() {
            crate::util::push_unique(&mut files, file);
        }
        Self {
            id,
            date: new.date,
            content: new.content,
            files,
            duration: new.duration,
        }
    }

    /// Parsed duration in hours, if it is a non-negative number.
    #[must_use]
    pub fn duration_hours(&self) -> Option<f64> {
        self.duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|h| h.is_finite() && *h >= 0.0)
    }
}

/// The top-level tracked unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque unique ID, assigned at creation.
    pub id: String,

    pub request_number: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    pub requester: String,
    #[serde(default)]
    pub content: String,

    // Dates are free-form `YYYY.MM.DD` text, never parsed.
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub completion_date: String,
    #[serde(default)]
    pub request_date: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Work log in insertion order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Issue {
    /// Build an issue from creation input, filling absent optional fields.
    ///
    /// Only `None` is defaulted; an explicit empty string is kept as given.
    #[must_use]
    pub fn from_new(id: String, new: NewIssue) -> Self {
        Self {
            id,
            request_number: new.request_number,
            title: new.title,
            department: new.department.unwrap_or_default(),
            requester: new.requester,
            content: new.content.unwrap_or_default(),
            start_date: new.start_date.unwrap_or_default(),
            end_date: new.end_date.unwrap_or_default(),
            completion_date: new.completion_date.unwrap_or_default(),
            request_date: new.request_date.unwrap_or_default(),
            status: Status::Progress,
            attachments: Vec::new(),
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn attachment(&self, id: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }

    /// Sum of task durations that parse as hours; blanks and text are skipped.
    #[must_use]
    pub fn total_duration_hours(&self) -> f64 {
        self.tasks.iter().filter_map(Task::duration_hours).sum()
    }
}

/// Creation input for an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub request_number: String,
    pub title: String,
    pub requester: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub request_date: Option<String>,
}

impl NewIssue {
    #[must_use]
    pub fn new(
        request_number: impl Into<String>,
        title: impl Into<String>,
        requester: impl Into<String>,
    ) -> Self {
        Self {
            request_number: request_number.into(),
            title: title.into(),
            requester: requester.into(),
            ..Default::default()
        }
    }
}

/// Creation input for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl NewTask {
    #[must_use]
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Creation input for an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttachment {
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_data: Option<String>,
}

impl NewAttachment {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Complete store state at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Newest-created first.
    #[serde(default)]
    pub issues: Vec<Issue>,

    /// Always serialized; `null` when nothing is selected.
    #[serde(default)]
    pub selected_issue_id: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected_issue_id
            .as_deref()
            .and_then(|id| self.issue(id))
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.issues.iter().position(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_toggle() {
        assert_eq!("progress".parse::<Status>().unwrap(), Status::Progress);
        assert_eq!("DONE".parse::<Status>().unwrap(), Status::Done);
        assert!("archived".parse::<Status>().is_err());
        assert_eq!(Status::Progress.toggled(), Status::Done);
        assert_eq!(Status::Done.toggled(), Status::Progress);
    }

    #[test]
    fn test_from_new_keeps_explicit_blank() {
        let new = NewIssue {
            department: Some(String::new()),
            content: None,
            ..NewIssue::new("R1", "T", "U")
        };
        let issue = Issue::from_new("i1".to_string(), new);
        assert_eq!(issue.department, "");
        assert_eq!(issue.content, "");
        assert_eq!(issue.status, Status::Progress);
        assert!(issue.attachments.is_empty());
        assert!(issue.tasks.is_empty());
    }

    #[test]
    fn test_task_from_new_dedupes_files() {
        let task = Task::from_new(
            "t1".to_string(),
            NewTask {
                files: Some(vec!["a.png".into(), "b.png".into(), "a.png".into()]),
                ..NewTask::new("2024.01.02", "work")
            },
        );
        assert_eq!(task.files, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_camel_case_field_names() {
        let issue = Issue::from_new("i1".to_string(), NewIssue::new("R1", "T", "U"));
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["requestNumber"], "R1");
        assert_eq!(json["status"], "progress");
        assert!(json.get("startDate").is_some());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let att = Attachment::from_new("a1".to_string(), NewAttachment::new("photo"));
        let json = serde_json::to_string(&att).unwrap();
        assert!(!json.contains("image"));

        let task = Task::from_new("t1".to_string(), NewTask::new("", "c"));
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("files"));
        assert!(!json.contains("duration"));
    }

    #[test]
    fn test_null_optional_loads_as_none() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t","date":"","content":"c","duration":null}"#).unwrap();
        assert_eq!(task.duration, None);
        assert!(task.files.is_empty());
    }

    #[test]
    fn test_total_duration_skips_unparseable() {
        let mut issue = Issue::from_new("i1".to_string(), NewIssue::new("R", "T", "U"));
        for (n, d) in [("1", Some("1.5")), ("2", Some("two")), ("3", None), ("4", Some(" 2 "))] {
            issue.tasks.push(Task::from_new(
                n.to_string(),
                NewTask {
                    duration: d.map(str::to_string),
                    ..NewTask::new("", "c")
                },
            ));
        }
        assert!((issue.total_duration_hours() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selected_issue_lookup() {
        let snapshot = Snapshot {
            issues: vec![Issue::from_new("i1".to_string(), NewIssue::new("R", "T", "U"))],
            selected_issue_id: Some("i1".to_string()),
        };
        assert_eq!(snapshot.selected_issue().map(|i| i.id.as_str()), Some("i1"));
        assert_eq!(snapshot.issue_count(), 1);
    }
}
