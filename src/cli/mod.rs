//! Command-line interface for `issuebook`.
//!
//! This module provides the CLI parsing and command routing using clap.
//! The store is opened once per invocation, commands run against it, and
//! the final state is flushed before exit if anything changed.

pub mod commands;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{CliOverrides, Config};
use crate::logging;

/// `issuebook` (ib) - Single-user issue tracker.
#[derive(Parser, Debug)]
#[command(name = "ib")]
#[command(
    author,
    version,
    about = "Single-user issue tracker with task logs and attachments",
    long_about = None,
    after_help = "Ids may be abbreviated to any unique prefix. Commands that take --issue default to the selected issue."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Data directory holding config.yaml and the slot file
    #[arg(long, global = true, env = "ISSUEBOOK_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Durable slot name
    #[arg(long, global = true)]
    pub slot: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a data directory
    Init(InitArgs),

    /// Create a new issue (and select it)
    Add(AddArgs),

    /// List issues, newest first
    List(ListArgs),

    /// Show issue details
    Show(ShowArgs),

    /// Update fields of an issue
    Update(UpdateArgs),

    /// Flip an issue between progress and done
    Toggle(IssueRef),

    /// Delete an issue with its tasks and attachments
    Delete(DeleteArgs),

    /// Select an issue, or clear the selection
    Select(SelectArgs),

    /// Manage the task log of an issue
    Task(TaskCommand),

    /// Manage attachments of an issue
    #[command(alias = "attachment")]
    Attach(AttachCommand),

    /// Print the JSON Schema of the slot file
    Schema,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Request number
    pub request_number: String,

    /// Title
    pub title: String,

    /// Requester
    pub requester: String,

    #[arg(long)]
    pub department: Option<String>,

    /// Description
    #[arg(long)]
    pub content: Option<String>,

    /// Start date (YYYY.MM.DD, default: today)
    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub completion_date: Option<String>,

    /// Request date (YYYY.MM.DD, default: today)
    #[arg(long)]
    pub request_date: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status tab: all, progress or done
    #[arg(short, long)]
    pub status: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Issue id (default: selected issue)
    pub id: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue id
    pub id: String,

    #[arg(long)]
    pub request_number: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub requester: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub completion_date: Option<String>,

    #[arg(long)]
    pub request_date: Option<String>,

    /// progress or done
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct IssueRef {
    /// Issue id (default: selected issue)
    pub id: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Issue id
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct SelectArgs {
    /// Issue id
    #[arg(required_unless_present = "clear")]
    pub id: Option<String>,

    /// Clear the selection
    #[arg(long, conflicts_with = "id")]
    pub clear: bool,
}

#[derive(Args, Debug)]
pub struct TaskCommand {
    /// Task subcommand
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TaskSubcommand {
    /// Append a task to the log
    Add(TaskAddArgs),

    /// Update a task
    Update(TaskUpdateArgs),

    /// Delete a task
    Delete(TaskRefArgs),

    /// Attach a filename to a task (ignored if already listed)
    AddFile(TaskFileArgs),

    /// Remove a filename from a task
    RemoveFile(TaskFileArgs),

    /// List the task log
    List(IssueOpt),
}

#[derive(Args, Debug, Default)]
pub struct IssueOpt {
    /// Issue id (default: selected issue)
    #[arg(long)]
    pub issue: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct TaskAddArgs {
    /// What was done
    pub content: String,

    /// Date (YYYY.MM.DD, default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Hours spent
    #[arg(long)]
    pub duration: Option<String>,

    /// Referenced filename (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug, Default)]
pub struct TaskUpdateArgs {
    /// Task id
    pub task: String,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long, conflicts_with = "clear_duration")]
    pub duration: Option<String>,

    /// Remove the duration
    #[arg(long)]
    pub clear_duration: bool,

    /// Replace the file list (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Remove every file reference
    #[arg(long, conflicts_with = "files")]
    pub clear_files: bool,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug, Default)]
pub struct TaskRefArgs {
    /// Task id
    pub task: String,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug, Default)]
pub struct TaskFileArgs {
    /// Task id
    pub task: String,

    /// Filename
    pub file: String,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug)]
pub struct AttachCommand {
    /// Attachment subcommand
    #[command(subcommand)]
    pub command: AttachSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AttachSubcommand {
    /// Add an attachment, optionally storing a file's content
    Add(AttachAddArgs),

    /// Delete an attachment
    Delete(AttachRefArgs),

    /// Write a stored attachment payload back to disk
    Save(AttachSaveArgs),

    /// List attachments
    List(IssueOpt),
}

#[derive(Args, Debug, Default)]
pub struct AttachAddArgs {
    /// Description
    pub content: String,

    /// File whose content is stored with the attachment
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Filename to record (default: name of --file)
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug, Default)]
pub struct AttachRefArgs {
    /// Attachment id
    pub attachment: String,

    #[command(flatten)]
    pub issue: IssueOpt,
}

#[derive(Args, Debug, Default)]
pub struct AttachSaveArgs {
    /// Attachment id
    pub attachment: String,

    /// Output path
    pub out: PathBuf,

    #[command(flatten)]
    pub issue: IssueOpt,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        data_dir: cli.data_dir.clone(),
        slot: cli.slot.clone(),
    };
    let config = Config::load(&overrides)?;
    logging::init_logging(cli.verbose, cli.quiet, config.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let Some(command) = cli.command else {
        println!("ib - single-user issue tracker. Use --help for usage.");
        return Ok(());
    };
    tracing::debug!("Running {}", command.name());

    match command {
        Commands::Init(args) => commands::init::execute(&args, &config)?,
        Commands::Schema => commands::schema::execute()?,
        Commands::Version => commands::version::execute(cli.json)?,
        command => {
            let mut store = commands::open_store(&config);
            let changed = Rc::new(Cell::new(false));
            let flag = Rc::clone(&changed);
            store.subscribe(move |_| flag.set(true));

            commands::execute(&mut store, command, &config, cli.json)?;

            // Each change was already written; flushing again surfaces a failed write.
            if changed.get() {
                store.flush()?;
            }
        }
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Add(_) => "add",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Update(_) => "update",
            Self::Toggle(_) => "toggle",
            Self::Delete(_) => "delete",
            Self::Select(_) => "select",
            Self::Task(task) => match task.command {
                TaskSubcommand::Add(_) => "task add",
                TaskSubcommand::Update(_) => "task update",
                TaskSubcommand::Delete(_) => "task delete",
                TaskSubcommand::AddFile(_) => "task add-file",
                TaskSubcommand::RemoveFile(_) => "task remove-file",
                TaskSubcommand::List(_) => "task list",
            },
            Self::Attach(attach) => match attach.command {
                AttachSubcommand::Add(_) => "attach add",
                AttachSubcommand::Delete(_) => "attach delete",
                AttachSubcommand::Save(_) => "attach save",
                AttachSubcommand::List(_) => "attach list",
            },
            Self::Schema => "schema",
            Self::Version => "version",
        }
    }
}
