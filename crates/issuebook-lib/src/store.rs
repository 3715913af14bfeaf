//! Persisted, observable issue store.
//!
//! `IssueStore` holds the canonical snapshot (all issues plus the selection
//! cursor). Each mutation produces the next snapshot copy-on-write, writes it
//! to the durable slot and then hands it to every observer. Snapshots already
//! handed out are never modified.
//!
//! Unknown ids are not errors here: the operation does nothing, nothing is
//! written and no observer is called.

use std::sync::Arc;

use crate::error::{IssuebookError, Result};
use crate::id::IdGenerator;
use crate::model::{Attachment, Issue, NewAttachment, NewIssue, NewTask, Snapshot, Task};
use crate::persist::{self, DEFAULT_SLOT, SlotStorage};
use crate::query::{IssueUpdate, StatusFilter, TaskUpdate};
use crate::util::{self, IdMatch};

/// Handle returned by [`IssueStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Arc<Snapshot>)>;

/// Issue store over a durable slot.
pub struct IssueStore {
    snapshot: Arc<Snapshot>,
    storage: Box<dyn SlotStorage>,
    ids: Box<dyn IdGenerator>,
    key: String,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the store on the default slot.
    ///
    /// Never fails: a missing or unreadable slot yields an empty store.
    pub fn open(storage: impl SlotStorage + 'static, ids: impl IdGenerator + 'static) -> Self {
        Self::open_slot(storage, ids, DEFAULT_SLOT)
    }

    /// Open the store on a named slot.
    pub fn open_slot(
        storage: impl SlotStorage + 'static,
        ids: impl IdGenerator + 'static,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let snapshot = load_snapshot(&storage, &key);
        tracing::debug!(
            "Opened slot '{}' with {} issue(s)",
            key,
            snapshot.issues.len()
        );

        Self {
            snapshot: Arc::new(snapshot),
            storage: Box::new(storage),
            ids: Box::new(ids),
            key,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Name of the slot this store persists to.
    #[must_use]
    pub fn slot_key(&self) -> &str {
        &self.key
    }

    /// Write the current snapshot, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn flush(&self) -> Result<()> {
        let blob = persist::encode_snapshot(&self.snapshot)?;
        self.storage.save(&self.key, &blob)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current snapshot. Cheap to clone and never changes afterwards.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// All issues, newest-created first.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.snapshot.issues
    }

    #[must_use]
    pub fn selected_issue_id(&self) -> Option<&str> {
        self.snapshot.selected_issue_id.as_deref()
    }

    #[must_use]
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.snapshot.selected_issue()
    }

    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.snapshot.issue(id)
    }

    /// Issues matching a status tab, in collection order.
    #[must_use]
    pub fn list_issues(&self, filter: StatusFilter) -> Vec<&Issue> {
        self.snapshot
            .issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.issues.is_empty()
    }

    // ========================================================================
    // Issues
    // ========================================================================

    /// Create an issue at the front of the collection and select it.
    pub fn add_issue(&mut self, new: NewIssue) -> String {
        let id = self.ids.next_id();
        let issue = Issue::from_new(id.clone(), new);

        let snapshot = Arc::make_mut(&mut self.snapshot);
        snapshot.issues.insert(0, issue);
        snapshot.selected_issue_id = Some(id.clone());

        self.publish("add_issue");
        id
    }

    /// Merge `update` onto the issue. Returns false if nothing changed.
    pub fn update_issue(&mut self, id: &str, update: &IssueUpdate) -> bool {
        let Some(pos) = self.snapshot.position(id) else {
            return false;
        };
        if !update.changes(&self.snapshot.issues[pos]) {
            return false;
        }

        update.apply_to(&mut Arc::make_mut(&mut self.snapshot).issues[pos]);
        self.publish("update_issue");
        true
    }

    /// Flip the issue between progress and done.
    pub fn toggle_status(&mut self, id: &str) -> bool {
        let Some(pos) = self.snapshot.position(id) else {
            return false;
        };

        let issue = &mut Arc::make_mut(&mut self.snapshot).issues[pos];
        issue.status = issue.status.toggled();
        self.publish("toggle_status");
        true
    }

    /// Remove the issue with its tasks and attachments, clearing the
    /// selection if it pointed at it.
    pub fn delete_issue(&mut self, id: &str) -> bool {
        let Some(pos) = self.snapshot.position(id) else {
            return false;
        };

        let snapshot = Arc::make_mut(&mut self.snapshot);
        snapshot.issues.remove(pos);
        if snapshot.selected_issue_id.as_deref() == Some(id) {
            snapshot.selected_issue_id = None;
        }

        self.publish("delete_issue");
        true
    }

    /// Move the selection cursor. Unknown ids are ignored.
    pub fn select_issue(&mut self, id: Option<&str>) -> bool {
        if self.snapshot.selected_issue_id.as_deref() == id {
            return false;
        }
        if let Some(id) = id {
            if self.snapshot.position(id).is_none() {
                tracing::debug!("Ignoring selection of unknown issue {id}");
                return false;
            }
        }

        Arc::make_mut(&mut self.snapshot).selected_issue_id = id.map(str::to_string);
        self.publish("select_issue");
        true
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Append a task to the issue's log. `None` if the issue is unknown.
    pub fn add_task(&mut self, issue_id: &str, new: NewTask) -> Option<String> {
        let pos = self.snapshot.position(issue_id)?;
        let id = self.ids.next_id();
        let task = Task::from_new(id.clone(), new);

        Arc::make_mut(&mut self.snapshot).issues[pos].tasks.push(task);
        self.publish("add_task");
        Some(id)
    }

    /// Merge `update` onto one task.
    pub fn update_task(&mut self, issue_id: &str, task_id: &str, update: &TaskUpdate) -> bool {
        let Some((i, t)) = self.task_position(issue_id, task_id) else {
            return false;
        };
        if !update.changes(&self.snapshot.issues[i].tasks[t]) {
            return false;
        }

        update.apply_to(&mut Arc::make_mut(&mut self.snapshot).issues[i].tasks[t]);
        self.publish("update_task");
        true
    }

    pub fn delete_task(&mut self, issue_id: &str, task_id: &str) -> bool {
        let Some((i, t)) = self.task_position(issue_id, task_id) else {
            return false;
        };

        Arc::make_mut(&mut self.snapshot).issues[i].tasks.remove(t);
        self.publish("delete_task");
        true
    }

    /// Add a filename to a task unless it is already listed.
    pub fn add_task_file(&mut self, issue_id: &str, task_id: &str, file: &str) -> bool {
        let Some((i, t)) = self.task_position(issue_id, task_id) else {
            return false;
        };
        if self.snapshot.issues[i].tasks[t].files.iter().any(|f| f == file) {
            return false;
        }

        let files = &mut Arc::make_mut(&mut self.snapshot).issues[i].tasks[t].files;
        util::push_unique(files, file.to_string());
        self.publish("add_task_file");
        true
    }

    /// Remove every occurrence of a filename from a task.
    pub fn remove_task_file(&mut self, issue_id: &str, task_id: &str, file: &str) -> bool {
        let Some((i, t)) = self.task_position(issue_id, task_id) else {
            return false;
        };
        if !self.snapshot.issues[i].tasks[t].files.iter().any(|f| f == file) {
            return false;
        }

        Arc::make_mut(&mut self.snapshot).issues[i].tasks[t]
            .files
            .retain(|f| f != file);
        self.publish("remove_task_file");
        true
    }

    // ========================================================================
    // Attachments
    // ========================================================================

    /// Append an attachment. `None` if the issue is unknown.
    pub fn add_attachment(&mut self, issue_id: &str, new: NewAttachment) -> Option<String> {
        let pos = self.snapshot.position(issue_id)?;
        let id = self.ids.next_id();
        let attachment = Attachment::from_new(id.clone(), new);

        Arc::make_mut(&mut self.snapshot).issues[pos]
            .attachments
            .push(attachment);
        self.publish("add_attachment");
        Some(id)
    }

    pub fn delete_attachment(&mut self, issue_id: &str, attachment_id: &str) -> bool {
        let Some(i) = self.snapshot.position(issue_id) else {
            return false;
        };
        let Some(a) = self.snapshot.issues[i]
            .attachments
            .iter()
            .position(|a| a.id == attachment_id)
        else {
            return false;
        };

        Arc::make_mut(&mut self.snapshot).issues[i]
            .attachments
            .remove(a);
        self.publish("delete_attachment");
        true
    }

    // ========================================================================
    // ID Resolution
    // ========================================================================

    /// Resolve a full or abbreviated issue id.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if nothing matches, or `AmbiguousId` if the
    /// prefix matches several issues.
    pub fn resolve_issue_id(&self, input: &str) -> Result<String> {
        let ids = self.snapshot.issues.iter().map(|i| i.id.as_str());
        match util::match_id(ids, input) {
            IdMatch::One(id) => Ok(id),
            IdMatch::None => Err(IssuebookError::IssueNotFound {
                id: input.to_string(),
            }),
            IdMatch::Many(matches) => Err(IssuebookError::AmbiguousId {
                partial: input.to_string(),
                matches,
            }),
        }
    }

    /// Resolve a full or abbreviated task id within one issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, `TaskNotFound` or `AmbiguousId`.
    pub fn resolve_task_id(&self, issue_id: &str, input: &str) -> Result<String> {
        let issue = self.require_issue(issue_id)?;
        let ids = issue.tasks.iter().map(|t| t.id.as_str());
        match util::match_id(ids, input) {
            IdMatch::One(id) => Ok(id),
            IdMatch::None => Err(IssuebookError::TaskNotFound {
                issue_id: issue_id.to_string(),
                id: input.to_string(),
            }),
            IdMatch::Many(matches) => Err(IssuebookError::AmbiguousId {
                partial: input.to_string(),
                matches,
            }),
        }
    }

    /// Resolve a full or abbreviated attachment id within one issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, `AttachmentNotFound` or `AmbiguousId`.
    pub fn resolve_attachment_id(&self, issue_id: &str, input: &str) -> Result<String> {
        let issue = self.require_issue(issue_id)?;
        let ids = issue.attachments.iter().map(|a| a.id.as_str());
        match util::match_id(ids, input) {
            IdMatch::One(id) => Ok(id),
            IdMatch::None => Err(IssuebookError::AttachmentNotFound {
                issue_id: issue_id.to_string(),
                id: input.to_string(),
            }),
            IdMatch::Many(matches) => Err(IssuebookError::AmbiguousId {
                partial: input.to_string(),
                matches,
            }),
        }
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register an observer called with every new snapshot.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Snapshot>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn require_issue(&self, id: &str) -> Result<&Issue> {
        self.snapshot
            .issue(id)
            .ok_or_else(|| IssuebookError::IssueNotFound { id: id.to_string() })
    }

    fn task_position(&self, issue_id: &str, task_id: &str) -> Option<(usize, usize)> {
        let i = self.snapshot.position(issue_id)?;
        let t = self.snapshot.issues[i]
            .tasks
            .iter()
            .position(|t| t.id == task_id)?;
        Some((i, t))
    }

    /// Persist the new snapshot, then notify observers. Write failures are
    /// logged and do not roll back the in-memory state.
    fn publish(&mut self, action: &str) {
        tracing::debug!(
            "{action}: {} issue(s), selected={:?}",
            self.snapshot.issues.len(),
            self.snapshot.selected_issue_id
        );

        if let Err(e) = self.flush() {
            tracing::warn!("Failed to persist slot '{}' after {action}: {e}", self.key);
        }

        for (_, observer) in &mut self.observers {
            observer(&self.snapshot);
        }
    }
}

/// Read the slot, falling back to an empty snapshot on any problem.
fn load_snapshot(storage: &dyn SlotStorage, key: &str) -> Snapshot {
    let blob = match storage.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Snapshot::default(),
        Err(e) => {
            tracing::warn!("Could not read slot '{key}', starting empty: {e}");
            return Snapshot::default();
        }
    };

    let mut snapshot = match persist::decode_snapshot(key, &blob) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Ignoring malformed slot: {e}");
            return Snapshot::default();
        }
    };

    let dangling = snapshot
        .selected_issue_id
        .as_deref()
        .is_some_and(|id| snapshot.issue(id).is_none());
    if dangling {
        tracing::debug!("Clearing selection of missing issue on load");
        snapshot.selected_issue_id = None;
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::model::Status;
    use crate::persist::MemorySlotStorage;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    struct BrokenStorage;

    impl SlotStorage for BrokenStorage {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(IssuebookError::Storage("disk unavailable".to_string()))
        }

        fn save(&self, _key: &str, _blob: &str) -> Result<()> {
            Err(IssuebookError::Storage("disk unavailable".to_string()))
        }
    }

    fn open_memory() -> (IssueStore, MemorySlotStorage) {
        let storage = MemorySlotStorage::new();
        let store = IssueStore::open(storage.clone(), SequentialIdGenerator::new("id"));
        (store, storage)
    }

    fn full_issue() -> NewIssue {
        NewIssue {
            department: Some(String::new()),
            content: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
            completion_date: Some(String::new()),
            request_date: Some(String::new()),
            ..NewIssue::new("R1", "T", "U")
        }
    }

    #[test]
    fn test_add_issue_defaults_and_selection() {
        let (mut store, _) = open_memory();
        let first = store.add_issue(full_issue());
        let second = store.add_issue(NewIssue::new("R2", "T2", "U2"));

        assert_eq!(store.issues()[0].id, second);
        assert_eq!(store.issues()[1].id, first);
        assert_eq!(store.selected_issue_id(), Some(second.as_str()));

        let issue = store.issue(&first).unwrap();
        assert_eq!(issue.status, Status::Progress);
        assert!(issue.attachments.is_empty());
        assert!(issue.tasks.is_empty());
        assert_eq!(issue.department, "");
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut store, storage) = open_memory();
        let id = store.add_issue(full_issue());
        let saved = persist::decode_snapshot(DEFAULT_SLOT, &storage.get(DEFAULT_SLOT).unwrap())
            .unwrap();
        assert_eq!(saved, *store.snapshot());

        store.add_task(&id, NewTask::new("2024.05.01", "A"));
        let saved = persist::decode_snapshot(DEFAULT_SLOT, &storage.get(DEFAULT_SLOT).unwrap())
            .unwrap();
        assert_eq!(saved.issues[0].tasks.len(), 1);
    }

    #[test]
    fn test_reopen_restores_state() {
        let (mut store, storage) = open_memory();
        let id = store.add_issue(full_issue());
        store.add_attachment(
            &id,
            NewAttachment {
                image: Some("photo.png".into()),
                image_data: Some("aGVsbG8=".into()),
                ..NewAttachment::new("front panel")
            },
        );

        let reopened = IssueStore::open(storage, SequentialIdGenerator::new("other"));
        assert_eq!(*reopened.snapshot(), *store.snapshot());
    }

    #[test]
    fn test_update_issue_merges_fields() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        store.add_task(&id, NewTask::new("d", "c"));
        let before = store.issue(&id).unwrap().clone();

        let changed = store.update_issue(
            &id,
            &IssueUpdate {
                title: Some("new".into()),
                ..Default::default()
            },
        );
        assert!(changed);

        let after = store.issue(&id).unwrap();
        assert_eq!(after.title, "new");
        assert_eq!(after.tasks, before.tasks);
        assert_eq!(after.requester, before.requester);
        assert_eq!(after.attachments, before.attachments);
    }

    #[test]
    fn test_delete_issue_cascades_and_clears_selection() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        store.add_task(&id, NewTask::new("", "a"));
        store.add_task(&id, NewTask::new("", "b"));
        store.add_attachment(&id, NewAttachment::new("x"));
        store.add_attachment(&id, NewAttachment::new("y"));

        assert!(store.delete_issue(&id));
        assert!(store.issue(&id).is_none());
        assert!(store.is_empty());
        assert_eq!(store.selected_issue_id(), None);
    }

    #[test]
    fn test_delete_other_issue_keeps_selection() {
        let (mut store, _) = open_memory();
        let other = store.add_issue(full_issue());
        let selected = store.add_issue(full_issue());

        assert!(store.delete_issue(&other));
        assert_eq!(store.selected_issue_id(), Some(selected.as_str()));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (mut store, storage) = open_memory();
        let id = store.add_issue(full_issue());
        let task = store.add_task(&id, NewTask::new("", "c")).unwrap();
        let before = store.snapshot();
        let blob = storage.get(DEFAULT_SLOT);

        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let update = IssueUpdate {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(!store.update_issue("missing", &update));
        assert!(!store.delete_issue("missing"));
        assert!(store.add_task("missing", NewTask::new("", "c")).is_none());
        assert!(
            store
                .add_attachment("missing", NewAttachment::new("c"))
                .is_none()
        );
        assert!(!store.update_task(&id, "missing", &TaskUpdate::default()));
        assert!(!store.update_task("missing", &task, &TaskUpdate::default()));
        assert!(!store.delete_task(&id, "missing"));
        assert!(!store.delete_attachment(&id, "missing"));
        assert!(!store.toggle_status("missing"));
        assert!(!store.select_issue(Some("missing")));

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(storage.get(DEFAULT_SLOT), blob);
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn test_tasks_keep_append_order() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        store.add_task(&id, NewTask::new("2024.12.31", "A"));
        store.add_task(&id, NewTask::new("2024.01.01", "B"));

        let contents: Vec<&str> = store.issue(&id).unwrap().tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["A", "B"]);
    }

    #[test]
    fn test_add_task_defaults_files() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        let task_id = store.add_task(&id, NewTask::new("", "c")).unwrap();
        let task = store.issue(&id).unwrap().task(&task_id).unwrap();
        assert!(task.files.is_empty());
        assert_eq!(task.duration, None);
    }

    #[test]
    fn test_update_and_delete_task() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        let a = store.add_task(&id, NewTask::new("d1", "a")).unwrap();
        let b = store.add_task(&id, NewTask::new("d2", "b")).unwrap();

        let update = TaskUpdate {
            content: Some("a2".into()),
            duration: Some(Some("1.5".into())),
            ..Default::default()
        };
        assert!(store.update_task(&id, &a, &update));
        assert!(!store.update_task(&id, &a, &update));

        let issue = store.issue(&id).unwrap();
        assert_eq!(issue.task(&a).unwrap().content, "a2");
        assert_eq!(issue.task(&a).unwrap().date, "d1");
        assert_eq!(issue.task(&b).unwrap().content, "b");

        assert!(store.delete_task(&id, &a));
        let ids: Vec<&str> = store.issue(&id).unwrap().tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![b.as_str()]);
    }

    #[test]
    fn test_task_files_suppress_duplicates_on_add() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        let task = store.add_task(&id, NewTask::new("", "c")).unwrap();

        assert!(store.add_task_file(&id, &task, "log.txt"));
        assert!(!store.add_task_file(&id, &task, "log.txt"));
        assert!(store.add_task_file(&id, &task, "shot.png"));
        assert_eq!(
            store.issue(&id).unwrap().task(&task).unwrap().files,
            vec!["log.txt", "shot.png"]
        );

        assert!(store.remove_task_file(&id, &task, "log.txt"));
        assert!(!store.remove_task_file(&id, &task, "log.txt"));
        assert_eq!(
            store.issue(&id).unwrap().task(&task).unwrap().files,
            vec!["shot.png"]
        );
    }

    #[test]
    fn test_attachments() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        let a = store.add_attachment(&id, NewAttachment::new("first")).unwrap();
        let b = store.add_attachment(&id, NewAttachment::new("second")).unwrap();

        assert!(store.delete_attachment(&id, &a));
        assert!(!store.delete_attachment(&id, &a));
        let remaining = &store.issue(&id).unwrap().attachments;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b);
    }

    #[test]
    fn test_toggle_status_both_ways() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        assert!(store.toggle_status(&id));
        assert_eq!(store.issue(&id).unwrap().status, Status::Done);
        assert_eq!(store.list_issues(StatusFilter::Done).len(), 1);
        assert!(store.list_issues(StatusFilter::Progress).is_empty());
        assert!(store.toggle_status(&id));
        assert_eq!(store.issue(&id).unwrap().status, Status::Progress);
    }

    #[test]
    fn test_select_issue() {
        let (mut store, _) = open_memory();
        let a = store.add_issue(full_issue());
        let b = store.add_issue(full_issue());

        assert!(store.select_issue(Some(a.as_str())));
        assert_eq!(store.selected_issue().map(|i| i.id.as_str()), Some(a.as_str()));
        assert!(!store.select_issue(Some(a.as_str())));
        assert!(!store.select_issue(Some("nope")));
        assert_eq!(store.selected_issue_id(), Some(a.as_str()));
        assert!(store.select_issue(None));
        assert_eq!(store.selected_issue_id(), None);
        assert!(store.select_issue(Some(b.as_str())));
    }

    #[test]
    fn test_ids_are_unique() {
        let storage = MemorySlotStorage::new();
        let mut store = IssueStore::open(storage, crate::id::UuidGenerator);
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let id = store.add_issue(full_issue());
            assert!(seen.insert(id.clone()));
            assert!(seen.insert(store.add_task(&id, NewTask::new("", "t")).unwrap()));
            assert!(seen.insert(store.add_attachment(&id, NewAttachment::new("a")).unwrap()));
        }
    }

    #[test]
    fn test_old_snapshots_are_untouched() {
        let (mut store, _) = open_memory();
        let id = store.add_issue(full_issue());
        let before = store.snapshot();
        store.add_task(&id, NewTask::new("", "c"));
        assert!(before.issues[0].tasks.is_empty());
        assert_eq!(store.issue(&id).unwrap().tasks.len(), 1);
    }

    #[test]
    fn test_observers_receive_snapshots() {
        let (mut store, _) = open_memory();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.issues.len()));

        store.add_issue(full_issue());
        store.add_issue(full_issue());
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_issue(full_issue());

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_malformed_slot_starts_empty() {
        let storage = MemorySlotStorage::new();
        storage.put(DEFAULT_SLOT, "{\"issues\": [");
        let store = IssueStore::open(storage, SequentialIdGenerator::new("id"));
        assert!(store.is_empty());
        assert_eq!(store.selected_issue_id(), None);
    }

    #[test]
    fn test_dangling_selection_cleared_on_load() {
        let storage = MemorySlotStorage::new();
        storage.put(DEFAULT_SLOT, r#"{"issues": [], "selectedIssueId": "gone"}"#);
        let store = IssueStore::open(storage, SequentialIdGenerator::new("id"));
        assert_eq!(store.selected_issue_id(), None);
    }

    #[test]
    fn test_write_failures_do_not_lose_state() {
        let mut store = IssueStore::open(BrokenStorage, SequentialIdGenerator::new("id"));
        assert!(store.is_empty());

        let id = store.add_issue(full_issue());
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_issue_id(), Some(id.as_str()));
        assert!(store.flush().is_err());
    }

    #[test]
    fn test_named_slots_are_independent() {
        let storage = MemorySlotStorage::new();
        let mut work = IssueStore::open_slot(storage.clone(), SequentialIdGenerator::new("w"), "work");
        work.add_issue(full_issue());

        let home = IssueStore::open_slot(storage.clone(), SequentialIdGenerator::new("h"), "home");
        assert!(home.is_empty());
        assert_eq!(home.slot_key(), "home");
        assert!(storage.get(DEFAULT_SLOT).is_none());
    }

    #[test]
    fn test_resolve_ids() {
        let (mut store, _) = open_memory();
        let a = store.add_issue(full_issue());
        let task = store.add_task(&a, NewTask::new("", "c")).unwrap();
        let att = store.add_attachment(&a, NewAttachment::new("c")).unwrap();

        assert_eq!(store.resolve_issue_id(&a).unwrap(), a);
        assert!(matches!(
            store.resolve_issue_id("zzz"),
            Err(IssuebookError::IssueNotFound { .. })
        ));
        assert_eq!(store.resolve_task_id(&a, &task).unwrap(), task);
        assert_eq!(store.resolve_attachment_id(&a, &att).unwrap(), att);
        assert!(matches!(
            store.resolve_task_id(&a, "nope"),
            Err(IssuebookError::TaskNotFound { .. })
        ));
        assert!(matches!(
            store.resolve_attachment_id("nope", "x"),
            Err(IssuebookError::IssueNotFound { .. })
        ));

        for _ in 0..7 {
            store.add_issue(full_issue());
        }
        // exact "id-1" wins over the longer "id-10"
        assert_eq!(store.resolve_issue_id("id-1").unwrap(), "id-1");
        assert!(matches!(
            store.resolve_issue_id("id"),
            Err(IssuebookError::AmbiguousId { .. })
        ));
    }
}
