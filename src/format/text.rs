//! Text formatting functions for `issuebook`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status badges ([progress], [done])
//! - Abbreviated ids
//! - Issue, task and attachment lines
//! - The multi-line issue detail view

use std::fmt::Write as _;

use issuebook_lib::{Attachment, Issue, Status, Task};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Characters of an id shown in list output.
pub const SHORT_ID_LEN: usize = 8;

/// Default display width for titles in list output.
pub const TITLE_WIDTH: usize = 40;

/// Marker for the selected issue.
pub const SELECTED_MARKER: &str = "▶";

/// Return the bracketed badge for a status.
#[must_use]
pub const fn format_status_badge(status: Status) -> &'static str {
    match status {
        Status::Progress => "[progress]",
        Status::Done => "[done]",
    }
}

/// First characters of an id, enough to resolve it again in most stores.
#[must_use]
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Cut `text` to at most `width` terminal columns, ending with `…` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `text` with spaces to `width` terminal columns.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

/// Format a single-line issue summary.
///
/// Format: `{marker} {short id} {badge} {start date} {title} ({requester}, {request number})`
#[must_use]
pub fn format_issue_line(issue: &Issue, selected: bool) -> String {
    let marker = if selected { SELECTED_MARKER } else { " " };
    let title = pad_to_width(&truncate_to_width(&issue.title, TITLE_WIDTH), TITLE_WIDTH);
    format!(
        "{marker} {:<8} {:<10} {:<10} {title} ({}, {})",
        short_id(&issue.id),
        format_status_badge(issue.status),
        issue.start_date,
        issue.requester,
        issue.request_number,
    )
}

/// Format one work-log entry.
#[must_use]
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!("{} {:<10} {}", short_id(&task.id), task.date, task.content);
    if let Some(duration) = task.duration.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = write!(line, " ({duration}h)");
    }
    if !task.files.is_empty() {
        let _ = write!(line, " [files: {}]", task.files.join(", "));
    }
    line
}

/// Format one attachment.
#[must_use]
pub fn format_attachment_line(attachment: &Attachment) -> String {
    let mut line = format!("{} {}", short_id(&attachment.id), attachment.content);
    if let Some(image) = attachment.image.as_deref().filter(|i| !i.is_empty()) {
        let _ = write!(line, " <{image}>");
        if attachment.image_data.is_some() {
            line.push_str(" (stored)");
        }
    }
    line
}

/// Multi-line detail view of one issue.
#[must_use]
pub fn format_issue_details(issue: &Issue, selected: bool) -> String {
    let mut out = String::new();
    let marker = if selected { " (selected)" } else { "" };
    let _ = writeln!(
        out,
        "{} {} {}{marker}",
        issue.id,
        format_status_badge(issue.status),
        issue.title
    );
    let fields = [
        ("Request no.", &issue.request_number),
        ("Requested", &issue.request_date),
        ("Requester", &issue.requester),
        ("Department", &issue.department),
        ("Start", &issue.start_date),
        ("End", &issue.end_date),
        ("Completed", &issue.completion_date),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "  {} {value}", pad_to_width(&format!("{label}:"), 13));
    }
    if !issue.content.is_empty() {
        let _ = writeln!(out, "\n{}", issue.content);
    }

    let _ = writeln!(out, "\nAttachments ({}):", issue.attachments.len());
    for attachment in &issue.attachments {
        let _ = writeln!(out, "  {}", format_attachment_line(attachment));
    }

    let _ = writeln!(
        out,
        "\nTasks ({}, {}h logged):",
        issue.tasks.len(),
        issue.total_duration_hours()
    );
    for task in &issue.tasks {
        let _ = writeln!(out, "  {}", format_task_line(task));
    }
    out
}
