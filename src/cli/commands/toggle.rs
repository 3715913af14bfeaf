//! Toggle command implementation.

use issuebook_lib::{IssueStore, IssuebookError};

use crate::Result;
use crate::cli::IssueRef;
use crate::cli::commands::{report, resolve_issue};
use crate::format::MutationResult;

/// Execute the toggle command.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved.
pub fn execute(store: &mut IssueStore, args: &IssueRef, json: bool) -> Result<()> {
    let id = resolve_issue(store, args.id.as_deref())?;
    let changed = store.toggle_status(&id);
    let status = store
        .issue(&id)
        .map(|issue| issue.status)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: id.clone() })?;

    report(
        json,
        &MutationResult::new("toggle", Some(&id), changed),
        &format!("Issue {id} is now {status}"),
    )
}
