//! List command implementation.

use issuebook_lib::{IssueStore, StatusFilter};

use crate::cli::ListArgs;
use crate::config::Config;
use crate::format::{IssueSummary, format_issue_line, print_json};
use crate::Result;

/// Execute the list command.
///
/// `--status` wins over the configured default filter.
///
/// # Errors
///
/// Returns `InvalidStatus` if `--status` is not a known tab.
pub fn execute(store: &IssueStore, args: &ListArgs, config: &Config, json: bool) -> Result<()> {
    let filter = match args.status.as_deref() {
        Some(status) => status.parse::<StatusFilter>()?,
        None => config.default_filter,
    };
    let selected = store.selected_issue_id();
    let issues = store.list_issues(filter);
    tracing::debug!("Listing {} issue(s) with filter {}", issues.len(), filter.as_str());

    if json {
        let summaries: Vec<IssueSummary> = issues
            .iter()
            .map(|issue| IssueSummary::new(issue, selected == Some(issue.id.as_str())))
            .collect();
        return print_json(&summaries);
    }

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }
    for issue in issues {
        println!("{}", format_issue_line(issue, selected == Some(issue.id.as_str())));
    }
    Ok(())
}
