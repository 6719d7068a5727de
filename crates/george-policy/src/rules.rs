// crates/george-policy/src/rules.rs
// ============================================================================
// Module: George Rule Table Loader
// Description: Loads `ops/rules/george_rules.yaml` into an ordered rule table.
// Purpose: Feed the Rule Engine a `Vec<Rule>` in declaration order.
// Dependencies: crate::loader, crate::schemas, george-core
// ============================================================================

//! ## Overview
//! The rule table is a bare YAML array; order is preserved by `serde_yaml`
//! and is load-bearing (first-match-wins is a contract of the Rule Engine,
//! not this loader, but this loader is what makes the order visible).

use std::path::Path;

use george_core::Rule;

use crate::loader::PolicyError;
use crate::loader::load_yaml;
use crate::schemas::rules_schema;

/// An ordered rule table, as matched by the Rule Engine.
pub type RuleTable = Vec<Rule>;

/// Loads the rule table from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_rule_table(path: &Path) -> Result<RuleTable, PolicyError> {
    load_yaml(path, &rules_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_rules_in_declaration_order() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"
- id: r1
  when: {{agent: monitoring, event: heartbeat}}
  then: {{decision_class: operational}}
- id: r2
  when: {{agent: monitoring}}
  then: {{decision_class: strategic}}
"#
        )
        .expect("write");
        let rules = load_rule_table(file.path()).expect("load");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id.as_str(), "r1");
        assert_eq!(rules[1].id.as_str(), "r2");
    }
}
