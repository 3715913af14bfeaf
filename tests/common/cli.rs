use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Scratch directory with its own data dir for one test.
pub struct IbWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl IbWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let root = temp.path().to_path_buf();
        let data_dir = root.join(".issuebook");
        Self {
            _temp: temp,
            root,
            data_dir,
        }
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(format!("{slot}.json"))
    }

    pub fn read_slot(&self, slot: &str) -> serde_json::Value {
        let text = fs::read_to_string(self.slot_path(slot)).expect("read slot file");
        serde_json::from_str(&text).expect("slot file is JSON")
    }
}

pub struct IbOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl IbOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

/// Run `ib` inside the workspace with its data dir.
pub fn run_ib<I, S>(workspace: &IbWorkspace, args: I, label: &str) -> IbOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::cargo_bin("ib").expect("ib binary");
    cmd.current_dir(&workspace.root)
        .arg("--data-dir")
        .arg(&workspace.data_dir)
        .args(args)
        .env_remove("ISSUEBOOK_DIR")
        .env_remove("ISSUEBOOK_SLOT")
        .env_remove("ISSUEBOOK_LOG_FILE")
        .env_remove("RUST_LOG");

    let output = cmd.output().expect("run ib");
    let result = IbOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] ib failed\nstdout:\n{}\nstderr:\n{}", result.stdout, result.stderr);
    }
    result
}

/// Run `ib --json` and return the parsed stdout, asserting success.
pub fn run_ib_json<I, S>(workspace: &IbWorkspace, args: I, label: &str) -> serde_json::Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut all: Vec<std::ffi::OsString> = vec!["--json".into()];
    all.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
    let output = run_ib(workspace, all, label);
    assert!(output.status.success(), "[{label}] failed: {}", output.stderr);
    output.json()
}
