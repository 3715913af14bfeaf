//! Error types for `issuebook-lib`.
//!
//! Store mutations never fail for business reasons; these variants cover
//! id resolution, validation done by hosts, and the persistence layer.

use thiserror::Error;

/// Primary error type for issuebook operations.
#[derive(Error, Debug)]
pub enum IssuebookError {
    // === Lookup Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Task with the specified ID was not found on the issue.
    #[error("Task not found on issue {issue_id}: {id}")]
    TaskNotFound { issue_id: String, id: String },

    /// Attachment with the specified ID was not found on the issue.
    #[error("Attachment not found on issue {issue_id}: {id}")]
    AttachmentNotFound { issue_id: String, id: String },

    /// Partial ID matches more than one entity.
    #[error("Ambiguous ID '{partial}': matches {matches:?}")]
    AmbiguousId {
        partial: String,
        matches: Vec<String>,
    },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    // === Persistence Errors ===
    /// Slot key contains characters that cannot name a durable slot.
    #[error("Invalid slot key: '{key}'")]
    InvalidSlotKey { key: String },

    /// The stored blob for a slot could not be decoded.
    #[error("Slot '{key}' is malformed: {reason}")]
    SlotParse { key: String, reason: String },

    /// Generic storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl IssuebookError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of field errors; a single error keeps the flat form.
    #[must_use]
    pub fn from_validation_errors(mut errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = errors.remove(0);
            Self::Validation {
                field: err.field,
                reason: err.message,
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for the lookup variants of an unknown id.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IssueNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::AttachmentNotFound { .. }
        )
    }
}

/// Result type using `IssuebookError`.
pub type Result<T> = std::result::Result<T, IssuebookError>;
