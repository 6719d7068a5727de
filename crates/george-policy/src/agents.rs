// crates/george-policy/src/agents.rs
// ============================================================================
// Module: George Agent Registry Loader
// Description: Loads `ops/autonomy.json`.
// Purpose: Feed the Guardian and Authority a validated `AgentRegistry`.
// Dependencies: crate::loader, crate::schemas, george-core
// ============================================================================

use std::path::Path;

use george_core::AgentRegistry;

use crate::loader::PolicyError;
use crate::loader::load_json;
use crate::schemas::agent_registry_schema;

/// Loads the agent registry from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_agent_registry(path: &Path) -> Result<AgentRegistry, PolicyError> {
    load_json(path, &agent_registry_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_a_minimal_registry() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"{{"monitoring": {{"status": "active", "autonomy": 0.8, "role": "monitoring agent"}}}}"#
        )
        .expect("write");
        let registry = load_agent_registry(file.path()).expect("load");
        assert!(registry.contains_key("monitoring"));
        assert!(registry["monitoring"].is_active());
    }
}
