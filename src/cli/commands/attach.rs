//! Attachment commands.
//!
//! File content is stored inline in the slot as standard base64 next to the
//! file name, so `attach save` can restore the original bytes.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use issuebook_lib::{IssueStore, IssuebookError, NewAttachment};

use crate::Result;
use crate::cli::commands::{report, resolve_issue};
use crate::cli::{AttachAddArgs, AttachRefArgs, AttachSaveArgs, AttachSubcommand};
use crate::format::{MutationResult, format_attachment_line, print_json};
use crate::validation::AttachmentValidator;

/// Execute an attachment subcommand.
///
/// # Errors
///
/// Returns an error if the issue or attachment cannot be resolved, or a
/// file cannot be read or written.
pub fn execute(store: &mut IssueStore, command: AttachSubcommand, json: bool) -> Result<()> {
    match command {
        AttachSubcommand::Add(args) => add(store, &args, json),
        AttachSubcommand::Delete(args) => delete(store, &args, json),
        AttachSubcommand::Save(args) => save(store, &args, json),
        AttachSubcommand::List(args) => list(store, args.issue.as_deref(), json),
    }
}

/// Read a file into a (name, base64 payload) pair.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read.
pub fn encode_file(path: &Path) -> Result<(String, String)> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok((name, STANDARD.encode(bytes)))
}

fn add(store: &mut IssueStore, args: &AttachAddArgs, json: bool) -> Result<()> {
    let mut new = NewAttachment {
        image: args.name.clone(),
        ..NewAttachment::new(&args.content)
    };
    if let Some(path) = &args.file {
        let (name, data) = encode_file(path)?;
        tracing::debug!("Encoded {} ({} base64 chars)", path.display(), data.len());
        new.image.get_or_insert(name);
        new.image_data = Some(data);
    }
    AttachmentValidator::validate_new(&new).map_err(IssuebookError::from_validation_errors)?;

    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let id = store
        .add_attachment(&issue_id, new)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: issue_id.clone() })?;

    report(
        json,
        &MutationResult::new("attach add", Some(&id), true),
        &format!("Added attachment {id} to issue {issue_id}"),
    )
}

fn delete(store: &mut IssueStore, args: &AttachRefArgs, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let id = store.resolve_attachment_id(&issue_id, &args.attachment)?;
    let changed = store.delete_attachment(&issue_id, &id);
    report(
        json,
        &MutationResult::new("attach delete", Some(&id), changed),
        &format!("Deleted attachment {id}"),
    )
}

fn save(store: &IssueStore, args: &AttachSaveArgs, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, args.issue.issue.as_deref())?;
    let id = store.resolve_attachment_id(&issue_id, &args.attachment)?;
    let attachment = store
        .issue(&issue_id)
        .and_then(|issue| issue.attachment(&id))
        .ok_or_else(|| IssuebookError::AttachmentNotFound {
            issue_id: issue_id.clone(),
            id: id.clone(),
        })?;
    let data = attachment
        .image_data
        .as_deref()
        .ok_or_else(|| IssuebookError::validation("imageData", "attachment has no stored content"))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| IssuebookError::validation("imageData", format!("invalid base64: {e}")))?;

    fs::write(&args.out, &bytes)?;
    tracing::info!("Wrote {} bytes to {}", bytes.len(), args.out.display());

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "path": args.out,
            "bytes": bytes.len(),
        }))
    } else {
        println!("Saved attachment {id} to {}", args.out.display());
        Ok(())
    }
}

fn list(store: &IssueStore, issue: Option<&str>, json: bool) -> Result<()> {
    let issue_id = resolve_issue(store, issue)?;
    let issue = store
        .issue(&issue_id)
        .ok_or_else(|| IssuebookError::IssueNotFound { id: issue_id.clone() })?;

    if json {
        return print_json(&issue.attachments);
    }
    if issue.attachments.is_empty() {
        println!("No attachments.");
    }
    for attachment in &issue.attachments {
        println!("{}", format_attachment_line(attachment));
    }
    Ok(())
}
