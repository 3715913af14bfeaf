//! Delete command implementation.

use issuebook_lib::IssueStore;

use crate::Result;
use crate::cli::DeleteArgs;
use crate::cli::commands::report;
use crate::format::MutationResult;

/// Execute the delete command. Tasks and attachments go with the issue.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved.
pub fn execute(store: &mut IssueStore, args: &DeleteArgs, json: bool) -> Result<()> {
    let id = store.resolve_issue_id(&args.id)?;
    let changed = store.delete_issue(&id);
    report(
        json,
        &MutationResult::new("delete", Some(&id), changed),
        &format!("Deleted issue {id}"),
    )
}
