//! Task log commands.

use issuebook_lib::util::today_stamp;
use issuebook_lib::{IssueStore, IssuebookError, NewTask, TaskUpdate};

use crate::Result;
use crate::cli::commands::{report, resolve_issue};
use crate::cli::{TaskAddArgs, TaskFileArgs, TaskRefArgs, TaskSubcommand, TaskUpdateArgs};
use crate::format::{MutationResult, format_task_line, print_json};
use crate::validation::TaskValidator;

/// Execute a task subcommand.
///
/// # Errors
///
/// Returns an error if the issue or task cannot be resolved or the input
/// is invalid.
pub fn execute(store: &mut IssueStore, command: TaskSubcommand, json: bool) -> Result<()> {
    match command {
        TaskSubcommand::Add(args) => add(store, &args, json),
        TaskSubcommand::Update(args) => update(store, &args, json),
        TaskSubcommand::Delete(args) => delete(store, &args, json),
        TaskSubcommand::AddFile(args) => add_file(store, &args, json),
        TaskSubcommand::RemoveFile(args) => remove_file(store, &args, json),
        TaskSubcommand::List(args) => list(store, args.issue.as_deref(), json),
    }
}

fn add(store: &mut IssueStore, args: &TaskAddArgs, json: bool) -> Result<()> {
    let new = NewTask {
        date: args.date.clone().unwrap_or_else(today_stamp),
        content: args.content.clone(),
        files: (!args.files.is_empty()).then(|| args.files.clone()),
        duration: args.duration.clone(),
    };
    TaskValidator::validate_new(&new).map_err(IssuebookError::from_validation_errors)?;

    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let id = store
        .add_task(&issue_id, new)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: issue_id.clone() })?;

    report(
        json,
        &MutationResult::new("task add", Some(&id), true),
        &format!("Logged task {id} on issue {issue_id}"),
    )
}

/// Build the partial task update from arguments.
#[must_use]
pub fn update_from_args(args: &TaskUpdateArgs) -> TaskUpdate {
    let files = if args.clear_files {
        Some(Vec::new())
    } else {
        (!args.files.is_empty()).then(|| args.files.clone())
    };
    let duration = if args.clear_duration {
        Some(None)
    } else {
        args.duration.clone().map(Some)
    };

    TaskUpdate {
        date: args.date.clone(),
        content: args.content.clone(),
        files,
        duration,
    }
}

fn update(store: &mut IssueStore, args: &TaskUpdateArgs, json: bool) -> Result<()> {
    let update = update_from_args(args);
    if update.is_empty() {
        return Err(IssuebookError::validation("update", "no fields to update"));
    }
    TaskValidator::validate_update(&update).map_err(IssuebookError::from_validation_errors)?;

    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let task_id = store.resolve_task_id(&issue_id, &args.task)?;
    let changed = store.update_task(&issue_id, &task_id, &update);
    report(
        json,
        &MutationResult::new("task update", Some(&task_id), changed),
        &format!("Updated task {task_id}"),
    )
}

fn delete(store: &mut IssueStore, args: &TaskRefArgs, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let task_id = store.resolve_task_id(&issue_id, &args.task)?;
    let changed = store.delete_task(&issue_id, &task_id);
    report(
        json,
        &MutationResult::new("task delete", Some(&task_id), changed),
        &format!("Deleted task {task_id}"),
    )
}

fn add_file(store: &mut IssueStore, args: &TaskFileArgs, json: bool) -> Result<()> {
    if args.file.trim().is_empty() {
        return Err(IssuebookError::validation("file", "cannot be empty"));
    }
    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let task_id = store.resolve_task_id(&issue_id, &args.task)?;
    let changed = store.add_task_file(&issue_id, &task_id, &args.file);
    report(
        json,
        &MutationResult::new("task add-file", Some(&task_id), changed),
        &format!("Added {} to task {task_id}", args.file),
    )
}

fn remove_file(store: &mut IssueStore, args: &TaskFileArgs, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let task_id = store.resolve_task_id(&issue_id, &args.task)?;
    let changed = store.remove_task_file(&issue_id, &task_id, &args.file);
    report(
        json,
        &MutationResult::new("task remove-file", Some(&task_id), changed),
        &format!("Removed {} from task {task_id}", args.file),
    )
}

fn list(store: &IssueStore, issue: Option<&str>, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, issue)?;
    let issue = store
        .issue(&issue_id)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: issue_id.clone() })?;

    if json {
        return print_json(&issue.tasks);
    }
    if issue.tasks.is_empty() {
        println!("No tasks logged.");
    }
    for task in &issue.tasks {
        println!("{}", format_task_line(task));
    }
    Ok(())
}
