//! Add command implementation.

use issuebook_lib::util::today_stamp;
use issuebook_lib::{IssueStore, NewIssue};

use crate::cli::AddArgs;
use crate::format::{MutationResult, print_json};
use crate::validation::IssueValidator;
use crate::{IssuebookError, Result};

/// Build the new-issue fields from arguments, dating omitted start and
/// request dates today.
#[must_use]
pub fn new_issue_from_args(args: &AddArgs) -> NewIssue {
    NewIssue {
        department: args.department.clone(),
        content: args.content.clone(),
        start_date: Some(args.start_date.clone().unwrap_or_else(today_stamp)),
        end_date: args.end_date.clone(),
        completion_date: args.completion_date.clone(),
        request_date: Some(args.request_date.clone().unwrap_or_else(today_stamp)),
        ..NewIssue::new(&args.request_number, &args.title, &args.requester)
    }
}

/// Execute the add command.
///
/// # Errors
///
/// Returns `ValidationErrors` if a required field is blank.
pub fn execute(store: &mut IssueStore, args: &AddArgs, json: bool) -> Result<()> {
    let new = new_issue_from_args(args);
    IssueValidator::validate_new(&new).map_err(IssuebookError::from_validation_errors)?;

    let id = store.add_issue(new);
    tracing::info!("Created issue {id}");

    if json {
        print_json(&MutationResult::new("add", Some(&id), true))?;
    } else {
        println!("Created issue {id}");
    }
    Ok(())
}
