//! Show command implementation.

use issuebook_lib::{IssueStore, IssuebookError};

use crate::Result;
use crate::cli::ShowArgs;
use crate::cli::commands::resolve_issue;
use crate::format::{IssueDetails, format_issue_details, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved.
pub fn execute(store: &IssueStore, args: &ShowArgs, json: bool) -> Result<()> {
    let id = resolve_issue(store, args.id.as_deref())?;
    let issue = store
        .issue(&id)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: id.clone() })?;
    let selected = store.selected_issue_id() == Some(id.as_str());

    if json {
        print_json(&IssueDetails {
            issue: issue.clone(),
            total_hours: issue.total_duration_hours(),
            selected,
        })
    } else {
        print!("{}", format_issue_details(issue, selected));
        Ok(())
    }
}
