//! `issuebook-lib` - In-process issue store.
//!
//! Holds a list of issues, each with descriptive fields, photo/file
//! attachments and a chronological task log, plus the currently selected
//! issue. Every change is written to a durable slot and announced to
//! observers.
//!
//! # Quick Start
//!
//! ```no_run
//! use issuebook_lib::{FileSlotStorage, IssueStore, IssueUpdate, NewIssue, NewTask, UuidGenerator};
//!
//! // Load the existing slot (or start empty)
//! let mut store = IssueStore::open(FileSlotStorage::new(".issuebook"), UuidGenerator);
//!
//! // Create; the new issue becomes the selection
//! let id = store.add_issue(NewIssue::new("R-104", "Replace projector lamp", "facilities"));
//!
//! // Log work
//! store.add_task(&id, NewTask::new("2024.05.02", "Ordered replacement lamp"));
//!
//! // Partial update
//! store.update_issue(&id, &IssueUpdate { department: Some("AV".into()), ..Default::default() });
//!
//! // Report any failed write before exiting
//! store.flush().unwrap();
//! ```

pub mod error;
pub mod id;
pub mod model;
pub mod persist;
pub mod query;
pub mod store;
pub mod util;

pub use error::{IssuebookError, Result, ValidationError};
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use model::{Attachment, Issue, NewAttachment, NewIssue, NewTask, Snapshot, Status, Task};
pub use persist::{DEFAULT_SLOT, FileSlotStorage, MemorySlotStorage, SlotStorage};
pub use query::{IssueUpdate, StatusFilter, TaskUpdate};
pub use store::{IssueStore, SubscriptionId};
