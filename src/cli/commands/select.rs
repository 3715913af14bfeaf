//! Select command implementation.

use issuebook_lib::IssueStore;

use crate::Result;
use crate::cli::SelectArgs;
use crate::cli::commands::report;
use crate::format::MutationResult;

/// Execute the select command.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved.
pub fn execute(store: &mut IssueStore, args: &SelectArgs, json: bool) -> Result<()> {
    let id = match args.id.as_deref() {
        Some(input) if !args.clear => Some(store.resolve_issue_id(input)?),
        _ => None,
    };
    let changed = store.select_issue(id.as_deref());
    let message = id.as_ref().map_or_else(
        || "Selection cleared".to_string(),
        |id| format!("Selected issue {id}"),
    );

    report(
        json,
        &MutationResult::new("select", id.as_deref(), changed),
        &message,
    )
}
