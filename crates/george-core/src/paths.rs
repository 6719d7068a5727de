// crates/george-core/src/paths.rs
// ============================================================================
// Module: George Path Configuration
// Description: Resolved canonical file-layout paths for every artifact.
// Purpose: Replace ad-hoc global path constants with one explicit struct
//          threaded through the pipeline (§9 "global mutable state becomes
//          single-writer artifacts plus an explicit struct").
// Dependencies: std::path, std::env
// ============================================================================

//! ## Overview
//! `PathConfig` resolves the file layout table in §6 exactly once, reading
//! `GEORGE_MODE`, `GEORGE_LATEST_PATH`, and `GUARDIAN_ADVICE_PATH` from the
//! environment when present and falling back to the hard-coded canonical
//! paths otherwise. Every component that reads or writes an artifact takes
//! a `&PathConfig` rather than hard-coding a path itself.

use std::env;
use std::path::Path;
use std::path::PathBuf;

/// `GEORGE_MODE` environment variable name.
pub const ENV_MODE: &str = "GEORGE_MODE";
/// `GEORGE_LATEST_PATH` environment variable name.
pub const ENV_LATEST_PATH: &str = "GEORGE_LATEST_PATH";
/// `GUARDIAN_ADVICE_PATH` environment variable name.
pub const ENV_GUARDIAN_ADVICE_PATH: &str = "GUARDIAN_ADVICE_PATH";

/// Resolved canonical paths for every artifact named in the file layout
/// table (§6). All paths are relative to `root` unless overridden by an
/// environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// The default contract mode (`GEORGE_MODE`, e.g. `"local"`, `"ci"`).
    pub mode: String,
    /// `ops/events.jsonl`.
    pub events: PathBuf,
    /// `ops/decisions/latest.json`.
    pub latest_decision: PathBuf,
    /// `ops/decisions/canonical_latest.json`.
    pub canonical_latest: PathBuf,
    /// `ops/decisions/history/`.
    pub history_dir: PathBuf,
    /// `ops/decisions/snapshots/`.
    pub snapshots_dir: PathBuf,
    /// `ops/decisions/gate_result.json`.
    pub gate_result: PathBuf,
    /// `ops/reports/decision_trace.jsonl`.
    pub decision_trace: PathBuf,
    /// `ops/reports/system_status.json`.
    pub system_status: PathBuf,
    /// `ops/reports/health_log.jsonl`.
    pub health_log: PathBuf,
    /// `ops/emergency_lock.json`.
    pub emergency_lock: PathBuf,
    /// `ops/rules/george_rules.yaml`.
    pub rules: PathBuf,
    /// `ops/authority_matrix.yaml`.
    pub authority_matrix: PathBuf,
    /// `ops/autonomy.json`.
    pub autonomy: PathBuf,
    /// `ops/capability_graph.json` (placement decided in `DESIGN.md`).
    pub capability_graph: PathBuf,
    /// `GUARDIAN_ADVICE_PATH`; advisory input external to the core, read
    /// by the Guardian precheck when present.
    pub guardian_advice: PathBuf,
}

impl PathConfig {
    /// Builds the canonical path set rooted at `root`, with no environment
    /// overrides applied.
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        let ops = root.join("ops");
        Self {
            mode: "local".to_string(),
            events: ops.join("events.jsonl"),
            latest_decision: ops.join("decisions").join("latest.json"),
            canonical_latest: ops.join("decisions").join("canonical_latest.json"),
            history_dir: ops.join("decisions").join("history"),
            snapshots_dir: ops.join("decisions").join("snapshots"),
            gate_result: ops.join("decisions").join("gate_result.json"),
            decision_trace: ops.join("reports").join("decision_trace.jsonl"),
            system_status: ops.join("reports").join("system_status.json"),
            health_log: ops.join("reports").join("health_log.jsonl"),
            emergency_lock: ops.join("emergency_lock.json"),
            rules: ops.join("rules").join("george_rules.yaml"),
            authority_matrix: ops.join("authority_matrix.yaml"),
            autonomy: ops.join("autonomy.json"),
            capability_graph: ops.join("capability_graph.json"),
            guardian_advice: ops.join("guardian_advice.json"),
        }
    }

    /// Builds the canonical path set rooted at the current working
    /// directory, then applies `GEORGE_MODE`, `GEORGE_LATEST_PATH`, and
    /// `GUARDIAN_ADVICE_PATH` overrides from the environment when present.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::rooted_at(Path::new("."));
        if let Ok(mode) = env::var(ENV_MODE) {
            config.mode = mode;
        }
        if let Ok(latest) = env::var(ENV_LATEST_PATH) {
            config.latest_decision = PathBuf::from(latest);
        }
        if let Ok(advice) = env::var(ENV_GUARDIAN_ADVICE_PATH) {
            config.guardian_advice = PathBuf::from(advice);
        }
        config
    }

    /// The per-day decision history file for `date` (`YYYY-MM-DD`).
    #[must_use]
    pub fn history_file(&self, date: &str) -> PathBuf {
        self.history_dir.join(format!("{date}.jsonl"))
    }

    /// The per-day snapshot file for `date` (`YYYY-MM-DD`).
    #[must_use]
    pub fn snapshot_file(&self, date: &str) -> PathBuf {
        self.snapshots_dir.join(format!("{date}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_paths_match_the_file_layout_table() {
        let config = PathConfig::rooted_at(Path::new("/srv/george"));
        assert_eq!(config.events, PathBuf::from("/srv/george/ops/events.jsonl"));
        assert_eq!(
            config.gate_result,
            PathBuf::from("/srv/george/ops/decisions/gate_result.json")
        );
        assert_eq!(
            config.decision_trace,
            PathBuf::from("/srv/george/ops/reports/decision_trace.jsonl")
        );
    }

    #[test]
    fn history_and_snapshot_files_are_dated() {
        let config = PathConfig::rooted_at(Path::new("."));
        assert_eq!(
            config.history_file("2026-07-28"),
            config.history_dir.join("2026-07-28.jsonl")
        );
        assert_eq!(
            config.snapshot_file("2026-07-28"),
            config.snapshots_dir.join("2026-07-28.json")
        );
    }
}
