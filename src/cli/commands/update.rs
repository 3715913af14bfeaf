//! Update command implementation.

use issuebook_lib::{IssueStore, IssueUpdate, Status};

use crate::cli::UpdateArgs;
use crate::cli::commands::report;
use crate::format::MutationResult;
use crate::validation::IssueValidator;
use crate::{IssuebookError, Result};

/// Build the partial update from arguments.
///
/// # Errors
///
/// Returns `InvalidStatus` if `--status` is not progress or done.
pub fn update_from_args(args: &UpdateArgs) -> Result<IssueUpdate> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()?;

    Ok(IssueUpdate {
        request_number: args.request_number.clone(),
        title: args.title.clone(),
        department: args.department.clone(),
        requester: args.requester.clone(),
        content: args.content.clone(),
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        completion_date: args.completion_date.clone(),
        request_date: args.request_date.clone(),
        status,
    })
}

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if no field was given, a required field is blanked,
/// or the issue cannot be resolved.
pub fn execute(store: &mut IssueStore, args: &UpdateArgs, json: bool) -> Result<()> {
    let update = update_from_args(args)?;
    if update.is_empty() {
        return Err(IssuebookError::validation("update", "no fields to update"));
    }
    IssueValidator::validate_update(&update).map_err(IssuebookError::from_validation_errors)?;

    let id = store.resolve_issue_id(&args.id)?;
    let changed = store.update_issue(&id, &update);
    report(
        json,
        &MutationResult::new("update", Some(&id), changed),
        &format!("Updated issue {id}"),
    )
}
