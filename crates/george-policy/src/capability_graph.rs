// crates/george-policy/src/capability_graph.rs
// ============================================================================
// Module: George Capability Graph
// Description: Loader for the Self-Healing quartet's capability graph.
// Purpose: Canonical shape for `ops/capability_graph.json` — the Open
//          Question resolution recorded in DESIGN.md: spec.md's file-layout
//          table does not name a path for this artifact, so George places it
//          alongside the other `ops/` policy documents.
// Dependencies: crate::loader, crate::schemas
// ============================================================================

//! ## Overview
//! The capability graph records, per agent, which actions it may take and
//! which decision classes it may be routed under. The `R1` self-healing
//! detector (capability drift) diffs this graph against the agent registry
//! and recent decisions; it is not otherwise consulted by the runtime.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::loader::PolicyError;
use crate::loader::load_json;
use crate::schemas::capability_graph_schema;

/// One agent's declared capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    /// Actions this agent is declared capable of performing.
    pub actions: Vec<String>,
    /// Decision classes this agent is declared capable of being routed
    /// under.
    pub decision_classes: Vec<String>,
}

/// The full capability graph: agent id to declared capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityGraph {
    /// The per-agent capability entries.
    pub agents: BTreeMap<String, CapabilityEntry>,
}

/// Loads the capability graph from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_capability_graph(path: &Path) -> Result<CapabilityGraph, PolicyError> {
    load_json(path, &capability_graph_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_a_minimal_graph() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"{{"agents": {{"monitoring": {{"actions": ["heartbeat"], "decision_classes": ["operational"]}}}}}}"#
        )
        .expect("write");
        let graph = load_capability_graph(file.path()).expect("load");
        let entry = graph.agents.get("monitoring").expect("agent present");
        assert_eq!(entry.actions, vec!["heartbeat".to_string()]);
    }
}
