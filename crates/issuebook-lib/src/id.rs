//! ID generation.
//!
//! The store asks its generator for one id per new issue, task and
//! attachment. Ids are opaque text and are never reused.

use uuid::Uuid;

use crate::model::Snapshot;

/// Source of fresh unique ids.
pub trait IdGenerator {
    /// Produce an id not produced before by this generator.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` ids.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Advance past every `<prefix>-<n>` id already present in `snapshot`.
    #[must_use]
    pub fn skip_existing(mut self, snapshot: &Snapshot) -> Self {
        let marker = format!("{}-", self.prefix);
        let existing = snapshot.issues.iter().flat_map(|issue| {
            std::iter::once(issue.id.as_str())
                .chain(issue.tasks.iter().map(|t| t.id.as_str()))
                .chain(issue.attachments.iter().map(|a| a.id.as_str()))
        });
        for id in existing {
            if let Some(n) = id
                .strip_prefix(&marker)
                .and_then(|rest| rest.parse::<u64>().ok())
            {
                self.next = self.next.max(n.saturating_add(1));
            }
        }
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
