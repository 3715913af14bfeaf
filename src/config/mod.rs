//! Configuration management for `issuebook`.
//!
//! Configuration is resolved in layers, lowest to highest:
//! - Built-in defaults
//! - Data-dir config (.issuebook/config.yaml)
//! - Environment variables (`ISSUEBOOK_SLOT`, `ISSUEBOOK_LOG_FILE`)
//! - CLI flags (`--data-dir` / `ISSUEBOOK_DIR`, `--slot`)

use std::fs;
use std::path::{Path, PathBuf};

use issuebook_lib::persist::validate_slot_key;
use issuebook_lib::{DEFAULT_SLOT, FileSlotStorage, StatusFilter};
use serde::{Deserialize, Serialize};

use crate::{IssuebookError, Result};

/// Data directory used when none is given.
pub const DEFAULT_DATA_DIR: &str = ".issuebook";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

pub const ENV_SLOT: &str = "ISSUEBOOK_SLOT";
pub const ENV_LOG_FILE: &str = "ISSUEBOOK_LOG_FILE";

/// Template written by `ib init`.
pub const CONFIG_TEMPLATE: &str = r"# issuebook configuration
# Name of the durable slot (file <slot>.json in this directory)
# slot: issue-storage
# Write diagnostics to this file instead of stderr
# log_file: ib.log
# Status tab used by `ib list` when --status is not given (all, progress, done)
# default_filter: all
";

/// Values read from `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub slot: Option<String>,
    pub log_file: Option<PathBuf>,
    pub default_filter: Option<StatusFilter>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub slot: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub slot: String,
    pub log_file: Option<PathBuf>,
    pub default_filter: StatusFilter,
}

impl Config {
    /// Resolve configuration against the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config file is malformed or the slot name is invalid.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an injected environment lookup.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config file is malformed or the slot name is invalid.
    pub fn resolve<F>(overrides: &CliOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = overrides
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let file = load_file(&data_dir.join(CONFIG_FILE))?;

        let slot = overrides
            .slot
            .clone()
            .or_else(|| env(ENV_SLOT).filter(|s| !s.is_empty()))
            .or(file.slot)
            .unwrap_or_else(|| DEFAULT_SLOT.to_string());
        validate_slot_key(&slot).map_err(|e| IssuebookError::Config(e.to_string()))?;

        let log_file = env(ENV_LOG_FILE)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or(file.log_file);

        Ok(Self {
            data_dir,
            slot,
            log_file,
            default_filter: file.default_filter.unwrap_or_default(),
        })
    }

    /// Slot storage rooted at the data directory.
    #[must_use]
    pub fn storage(&self) -> FileSlotStorage {
        FileSlotStorage::new(&self.data_dir)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

/// Read `config.yaml`. A missing file yields the empty config.
///
/// # Errors
///
/// Returns `Io` if the file exists but cannot be read, or `Config` if it
/// is not valid YAML for [`FileConfig`].
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => return Err(IssuebookError::Io(e)),
    };
    // A fresh template is all comments, which YAML reads as no document.
    let has_content = text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&text)
        .map_err(|e| IssuebookError::Config(format!("{}: {e}", path.display())))
}
