//! Output formatting for `issuebook`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! Diagnostics never go to stdout, so `--json` output can be piped as is.
//!
//! # JSON Output Types
//!
//! - [`IssueSummary`] - Issue with task/attachment counts (list)
//! - [`IssueDetails`] - Full issue with derived totals (show)
//! - [`MutationResult`] - Outcome of a mutating command

mod output;
mod text;

pub use output::{IssueDetails, IssueSummary, MutationResult};
pub use text::{
    SELECTED_MARKER, format_attachment_line, format_issue_details, format_issue_line,
    format_status_badge, format_task_line, pad_to_width, short_id, truncate_to_width,
};

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn print_json<T: serde::Serialize>(value: &T) -> issuebook_lib::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
