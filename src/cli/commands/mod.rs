//! Command implementations for `ib`.
//!
//! Every store command takes the open [`IssueStore`] so it can be driven
//! directly from tests with an in-memory slot.

pub mod add;
pub mod attach;
pub mod delete;
pub mod init;
pub mod list;
pub mod schema;
pub mod select;
pub mod show;
pub mod task;
pub mod toggle;
pub mod update;
pub mod version;

use issuebook_lib::{IssueStore, UuidGenerator};

use crate::cli::Commands;
use crate::config::Config;
use crate::format::{MutationResult, print_json};
use crate::{IssuebookError, Result};

/// Open the store on the configured slot.
#[must_use]
pub fn open_store(config: &Config) -> IssueStore {
    IssueStore::open_slot(config.storage(), UuidGenerator, config.slot.clone())
}

/// Run a command that needs the store.
///
/// # Errors
///
/// Returns whatever the command returns.
pub fn execute(store: &mut IssueStore, command: Commands, config: &Config, json: bool) -> Result<()> {
    match command {
        Commands::Add(args) => add::execute(store, &args, json),
        Commands::List(args) => list::execute(store, &args, config, json),
        Commands::Show(args) => show::execute(store, &args, json),
        Commands::Update(args) => update::execute(store, &args, json),
        Commands::Toggle(args) => toggle::execute(store, &args, json),
        Commands::Delete(args) => delete::execute(store, &args, json),
        Commands::Select(args) => select::execute(store, &args, json),
        Commands::Task(task) => task::execute(store, task.command, json),
        Commands::Attach(attach) => attach::execute(store, attach.command, json),
        Commands::Init(_) | Commands::Schema | Commands::Version => Err(
            IssuebookError::Config("command does not use the store".to_string()),
        ),
    }
}

/// Resolve an explicit issue id, or fall back to the selected issue.
///
/// # Errors
///
/// Returns a resolution error for a bad id, or `Validation` if no id was
/// given and nothing is selected.
pub fn resolve_issue(store: &IssueStore, id: Option<&str>) -> Result<String> {
    match id {
        Some(id) => store.resolve_issue_id(id),
        None => store
            .selected_issue_id()
            .map(str::to_string)
            .ok_or_else(|| IssuebookError::validation("issue", "no issue given and none selected")),
    }
}

/// Report the outcome of a mutation.
pub(crate) fn report(json: bool, result: &MutationResult, message: &str) -> Result<()> {
    if json {
        print_json(result)
    } else {
        if result.changed {
            println!("{message}");
        } else {
            println!("Nothing changed");
        }
        Ok(())
    }
}
