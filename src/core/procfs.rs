//! Process record source backed by the proc pseudo-filesystem.
//!
//! Every numeric directory under the procfs root is a process; its `status`
//! file carries the `Name:` and `PPid:` fields the tree is built from.
//! Processes that exit while the directory is being walked are skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PstreeError, Result};

use super::process::{truncate_name, ProcessInfo};

const NAME_KEY: &str = "Name:";
const PPID_KEY: &str = "PPid:";

/// Anything that can produce a snapshot of the running processes
pub trait ProcessSource {
    fn collect(&self) -> Result<Vec<ProcessInfo>>;
}

/// Configuration for the procfs source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub procfs_root: PathBuf,
    /// Upper bound on stored process name length, in bytes
    pub max_name_len: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            procfs_root: PathBuf::from("/proc"),
            max_name_len: 127,
        }
    }
}

/// Reads process records from `/proc` (or a directory laid out like it)
#[derive(Debug, Clone, Default)]
pub struct ProcfsSource {
    config: SourceConfig,
}

impl ProcfsSource {
    pub fn new() -> Self {
        Self::with_config(SourceConfig::default())
    }

    pub fn with_config(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.procfs_root
    }

    fn read_record(&self, pid: u32) -> Result<ProcessInfo> {
        let status_path = self.root().join(pid.to_string()).join("status");
        let data =
            fs::read(&status_path).map_err(|e| PstreeError::record_unreadable(pid, e))?;
        let content = String::from_utf8_lossy(&data);

        let (name, parent_pid) = parse_status(&content, self.config.max_name_len);
        Ok(ProcessInfo::new(pid, name, parent_pid))
    }
}

impl ProcessSource for ProcfsSource {
    fn collect(&self) -> Result<Vec<ProcessInfo>> {
        let root = self.root();
        log::debug!("Enumerating processes under {:?}", root);

        let entries =
            fs::read_dir(root).map_err(|e| PstreeError::source_unavailable(root, e))?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {:?}: {}", root, e);
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(pid) = file_name.to_str().and_then(parse_pid) else {
                continue;
            };

            match self.read_record(pid) {
                Ok(record) => records.push(record),
                Err(PstreeError::RecordUnreadable { pid, source })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    log::debug!("Process {} exited before it could be read", pid);
                }
                Err(e) => {
                    log::debug!("Skipping process {}: {:#}", pid, anyhow::Error::from(e));
                }
            }
        }

        for record in &records {
            log::trace!(
                "record name={:?} pid={} ppid={:?}",
                record.name,
                record.pid,
                record.parent_pid
            );
        }
        log::debug!("Collected {} process records", records.len());

        Ok(records)
    }
}

/// Interpret a procfs directory name as a process identifier
pub fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Extract the name and parent pid from the contents of a `status` file.
///
/// A missing `Name:` line yields an empty name; a missing or malformed
/// `PPid:` line yields `None`.
pub fn parse_status(content: &str, max_name_len: usize) -> (String, Option<u32>) {
    let mut name = None;
    let mut parent_pid = None;

    for line in content.lines() {
        if name.is_none() {
            if let Some(value) = line.strip_prefix(NAME_KEY) {
                name = Some(truncate_name(value.trim(), max_name_len).to_string());
                continue;
            }
        }
        if let Some(value) = line.strip_prefix(PPID_KEY) {
            parent_pid = value.trim().parse().ok();
        }
        if name.is_some() && parent_pid.is_some() {
            break;
        }
    }

    (name.unwrap_or_default(), parent_pid)
}
