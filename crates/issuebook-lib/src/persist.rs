//! Durable key-value slots holding serialized snapshots.
//!
//! A slot is a named location whose value is one JSON document. The store
//! loads its slot once when opened and overwrites it after every change.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{IssuebookError, Result};
use crate::model::Snapshot;

/// Slot name used when none is configured.
pub const DEFAULT_SLOT: &str = "issue-storage";

/// Durable persistence primitive.
pub trait SlotStorage {
    /// Read the blob stored under `key`, `None` if the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the slot with `blob`.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// Serialize a snapshot into the slot format.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a slot blob back into a snapshot.
///
/// # Errors
///
/// Returns `SlotParse` if the blob is not valid JSON or lacks required fields.
pub fn decode_snapshot(key: &str, blob: &str) -> Result<Snapshot> {
    serde_json::from_str(blob).map_err(|e| IssuebookError::SlotParse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Reject keys that could escape the slot directory or hide files.
///
/// # Errors
///
/// Returns `InvalidSlotKey` for empty keys, a leading `.`, or characters
/// outside ASCII alphanumerics, `-`, `_` and `.`.
pub fn validate_slot_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(IssuebookError::InvalidSlotKey {
            key: key.to_string(),
        })
    }
}

/// One JSON file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSlotKey` if the key is not a valid slot name.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_slot_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStorage for FileSlotStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IssuebookError::Io(e)),
        }
    }

    /// Writes to a sibling temp file, then renames over the slot.
    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(blob.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        tracing::trace!("Wrote slot {} ({} bytes)", path.display(), blob.len());
        Ok(())
    }
}

/// Shared in-memory slots. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of a slot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Overwrite a slot directly, bypassing any store.
    pub fn put(&self, key: impl Into<String>, blob: impl Into<String>) {
        self.slots.borrow_mut().insert(key.into(), blob.into());
    }
}

impl SlotStorage for MemorySlotStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_slot_key(key)?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        validate_slot_key(key)?;
        self.put(key, blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Issue, NewIssue};

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            issues: vec![Issue::from_new(
                "i-1".to_string(),
                NewIssue::new("R-1", "Printer jam", "kim"),
            )],
            selected_issue_id: Some("i-1".to_string()),
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSlotStorage::new(dir.path());
        let snapshot = sample_snapshot();

        storage
            .save(DEFAULT_SLOT, &encode_snapshot(&snapshot).unwrap())
            .unwrap();

        let blob = storage.load(DEFAULT_SLOT).unwrap().unwrap();
        assert_eq!(decode_snapshot(DEFAULT_SLOT, &blob).unwrap(), snapshot);
        assert!(dir.path().join("issue-storage.json").exists());
        assert!(!dir.path().join("issue-storage.json.tmp").exists());
    }

    #[test]
    fn test_file_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSlotStorage::new(dir.path().join("never-created"));
        assert!(storage.load(DEFAULT_SLOT).unwrap().is_none());
    }

    #[test]
    fn test_file_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSlotStorage::new(dir.path().join("nested/data"));
        storage.save("slot", "{}").unwrap();
        assert_eq!(storage.load("slot").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        for key in ["", "../escape", ".hidden", "a/b", "sp ace"] {
            assert!(
                matches!(
                    validate_slot_key(key),
                    Err(IssuebookError::InvalidSlotKey { .. })
                ),
                "{key:?} should be rejected"
            );
        }
        assert!(validate_slot_key("issue-storage.v1_backup").is_ok());
    }

    #[test]
    fn test_memory_clones_share_slots() {
        let storage = MemorySlotStorage::new();
        let other = storage.clone();
        storage.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode_snapshot("k", "{not json").unwrap_err();
        assert!(matches!(err, IssuebookError::SlotParse { .. }));

        // issues entries must carry their required fields
        let err = decode_snapshot("k", r#"{"issues":[{"id":"x"}]}"#).unwrap_err();
        assert!(matches!(err, IssuebookError::SlotParse { .. }));
    }

    #[test]
    fn test_encoded_layout() {
        let blob = encode_snapshot(&Snapshot::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert!(value["issues"].as_array().unwrap().is_empty());
        assert!(value["selectedIssueId"].is_null());
    }
}
