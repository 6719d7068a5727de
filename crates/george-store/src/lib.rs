#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only assertions are permitted to panic."
    )
)]
// crates/george-store/src/lib.rs
// ============================================================================
// Crate: george-store
// Description: Filesystem-backed implementation of the `ArtifactStore`
//              interface.
// Purpose: Append-only JSONL traces, atomic JSON writes, tail reads, and
//          per-day snapshot aggregation (§4.1).
// Dependencies: george-core, serde_json
// ============================================================================

//! # george-store
//!
//! `FsArtifactStore` is the sole production implementation of
//! [`george_core::interfaces::ArtifactStore`] in this workspace: every
//! write goes through a temp-sibling-plus-rename so a reader never observes
//! a partially written canonical file, and every trace append is a single
//! `write` syscall of one JSON line plus a trailing newline.

#![forbid(unsafe_code)]

use std::fs;
use std::fs::OpenOptions;
use std::io::BufRead;
use std::io::Write as _;
use std::path::Path;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use george_core::Decision;
use george_core::DailySnapshot;
use george_core::SnapshotUpdate;
use george_core::TraceEntry;
use george_core::Timestamp;
use george_core::interfaces::ArtifactStore;
use george_core::interfaces::StoreError;
use serde_json::Value;

/// Monotonic counter folded into temp-file names so concurrent writers
/// within one process never collide, even when invoked within the same
/// nanosecond.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Filesystem-backed [`ArtifactStore`]. Stateless: every operation takes
/// the full target path explicitly, matching the "paths are contracts"
/// design of §6 — there is no base directory to configure.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsArtifactStore;

impl FsArtifactStore {
    /// Creates a new filesystem-backed artifact store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Writes `bytes` to `path` via a temp sibling file plus an atomic
    /// rename, creating parent directories as needed.
    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;

        let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string());
        let temp_path = parent.join(format!(".{file_name}.tmp.{}.{suffix}", std::process::id()));

        fs::write(&temp_path, bytes).map_err(|e| Self::io_error(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| Self::io_error(path, e))?;
        Ok(())
    }
}

impl ArtifactStore for FsArtifactStore {
    fn append_trace(&self, path: &Path, entry: &TraceEntry) -> Result<(), StoreError> {
        let value = serde_json::to_value(entry).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.append_jsonl(path, &value)
    }

    fn append_jsonl(&self, path: &Path, value: &Value) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }
        let mut line =
            serde_json::to_string(value).map_err(|e| StoreError::Encode(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Self::io_error(path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| Self::io_error(path, e))?;
        Ok(())
    }

    fn write_canonical(&self, path: &Path, value: &Value) -> Result<(), StoreError> {
        let mut bytes =
            serde_json::to_vec_pretty(value).map_err(|e| StoreError::Encode(e.to_string()))?;
        bytes.push(b'\n');
        Self::write_atomic(path, &bytes)
    }

    fn read_tail(&self, path: &Path, n: usize) -> Result<Vec<String>, StoreError> {
        if n == 0 || !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(path).map_err(|e| Self::io_error(path, e))?;
        let reader = std::io::BufReader::new(file);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| Self::io_error(path, e))?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        let start = lines.len().saturating_sub(n);
        Ok(lines.split_off(start))
    }

    fn update_snapshot(
        &self,
        path: &Path,
        date: &str,
        decision: &Decision,
        at: Timestamp,
    ) -> Result<SnapshotUpdate, StoreError> {
        let (mut snapshot, recovered_corruption) = if path.exists() {
            let bytes = fs::read(path).map_err(|e| Self::io_error(path, e))?;
            match serde_json::from_slice::<DailySnapshot>(&bytes) {
                Ok(snapshot) => (snapshot, None),
                Err(err) => (
                    DailySnapshot::empty(date, at),
                    Some(format!(
                        "corrupt snapshot at {}: {err}",
                        path.display()
                    )),
                ),
            }
        } else {
            (DailySnapshot::empty(date, at), None)
        };

        snapshot.record(decision, at);
        let value = serde_json::to_value(&snapshot).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.write_canonical(path, &value)?;

        Ok(SnapshotUpdate {
            snapshot,
            recovered_corruption,
        })
    }
}
