//! Validation helpers for `issuebook`.
//!
//! The store accepts any text. These checks are the host's side of the
//! contract: required fields must be present before an operation is issued.
//! They return structured validation errors without touching the store.

use issuebook_lib::{IssueUpdate, NewAttachment, NewIssue, NewTask, TaskUpdate, ValidationError};

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 500;

fn require(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "cannot be empty"));
    }
}

fn require_if_set(errors: &mut Vec<ValidationError>, field: &str, value: Option<&String>) {
    if let Some(value) = value {
        require(errors, field, value);
    }
}

fn check_title(errors: &mut Vec<ValidationError>, title: &str) {
    if title.chars().count() > MAX_TITLE_CHARS {
        errors.push(ValidationError::new("title", "exceeds 500 characters"));
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates issue input.
pub struct IssueValidator;

impl IssueValidator {
    /// Request number, title and requester are required.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate_new(issue: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require(&mut errors, "requestNumber", &issue.request_number);
        require(&mut errors, "title", &issue.title);
        require(&mut errors, "requester", &issue.requester);
        check_title(&mut errors, &issue.title);
        finish(errors)
    }

    /// Required fields may be edited but not blanked.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate_update(update: &IssueUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require_if_set(&mut errors, "requestNumber", update.request_number.as_ref());
        require_if_set(&mut errors, "title", update.title.as_ref());
        require_if_set(&mut errors, "requester", update.requester.as_ref());
        if let Some(title) = &update.title {
            check_title(&mut errors, title);
        }
        finish(errors)
    }
}

/// Validates task input.
pub struct TaskValidator;

impl TaskValidator {
    /// Content is required.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate_new(task: &NewTask) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require(&mut errors, "content", &task.content);
        if let Some(files) = &task.files {
            for file in files {
                require(&mut errors, "files", file);
            }
        }
        finish(errors)
    }

    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate_update(update: &TaskUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require_if_set(&mut errors, "content", update.content.as_ref());
        finish(errors)
    }
}

/// Validates attachment input.
pub struct AttachmentValidator;

impl AttachmentValidator {
    /// Content (the description) is required.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate_new(attachment: &NewAttachment) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require(&mut errors, "content", &attachment.content);
        if attachment.image_data.is_some() && attachment.image.is_none() {
            errors.push(ValidationError::new("image", "payload given without a filename"));
        }
        finish(errors)
    }
}
