//! Partial-update and filter types for store operations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Issue, Status, Task};

/// Fields to update on an issue. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub request_number: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub requester: Option<String>,
    pub content: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub completion_date: Option<String>,
    pub request_date: Option<String>,
    pub status: Option<Status>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.request_number.is_none()
            && self.title.is_none()
            && self.department.is_none()
            && self.requester.is_none()
            && self.content.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.completion_date.is_none()
            && self.request_date.is_none()
            && self.status.is_none()
    }

    /// Merge the given fields onto `issue`. Returns true if anything changed.
    pub fn apply_to(&self, issue: &mut Issue) -> bool {
        let mut changed = false;
        changed |= assign(&mut issue.request_number, self.request_number.as_ref());
        changed |= assign(&mut issue.title, self.title.as_ref());
        changed |= assign(&mut issue.department, self.department.as_ref());
        changed |= assign(&mut issue.requester, self.requester.as_ref());
        changed |= assign(&mut issue.content, self.content.as_ref());
        changed |= assign(&mut issue.start_date, self.start_date.as_ref());
        changed |= assign(&mut issue.end_date, self.end_date.as_ref());
        changed |= assign(&mut issue.completion_date, self.completion_date.as_ref());
        changed |= assign(&mut issue.request_date, self.request_date.as_ref());
        changed |= assign(&mut issue.status, self.status.as_ref());
        changed
    }

    /// Would applying this update change `issue`?
    #[must_use]
    pub fn changes(&self, issue: &Issue) -> bool {
        let mut probe = issue.clone();
        self.apply_to(&mut probe)
    }
}

/// Fields to update on a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub date: Option<String>,
    pub content: Option<String>,
    /// Replaces the whole list as given; duplicates are not removed here.
    pub files: Option<Vec<String>>,
    /// `Some(None)` clears the duration.
    pub duration: Option<Option<String>>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.content.is_none()
            && self.files.is_none()
            && self.duration.is_none()
    }

    /// Merge the given fields onto `task`. Returns true if anything changed.
    pub fn apply_to(&self, task: &mut Task) -> bool {
        let mut changed = false;
        changed |= assign(&mut task.date, self.date.as_ref());
        changed |= assign(&mut task.content, self.content.as_ref());
        changed |= assign(&mut task.files, self.files.as_ref());
        changed |= assign(&mut task.duration, self.duration.as_ref());
        changed
    }

    #[must_use]
    pub fn changes(&self, task: &Task) -> bool {
        let mut probe = task.clone();
        self.apply_to(&mut probe)
    }
}

fn assign<T: PartialEq + Clone>(slot: &mut T, value: Option<&T>) -> bool {
    match value {
        Some(v) if slot != v => {
            slot.clone_from(v);
            true
        }
        _ => false,
    }
}

/// Status tab used when listing issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Progress,
    Done,
}

impl StatusFilter {
    #[must_use]
    pub const fn matches(self, issue: &Issue) -> bool {
        match self {
            Self::All => true,
            Self::Progress => matches!(issue.status, Status::Progress),
            Self::Done => matches!(issue.status, Status::Done),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::error::IssuebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(match s.parse::<Status>()? {
            Status::Progress => Self::Progress,
            Status::Done => Self::Done,
        })
    }
}
