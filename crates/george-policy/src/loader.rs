// crates/george-policy/src/loader.rs
// ============================================================================
// Module: George Policy Loader
// Description: Generic schema-validated document loading.
// Purpose: Every policy/rule document is read, schema-validated, then
//          deserialized — in that order, so a malformed document fails
//          closed with a readable message instead of a confusing serde
//          error or a silently-wrong default (§7).
// Dependencies: george-core is not required here; jsonschema, serde,
//               serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! `load_yaml` and `load_json` are the two entry points every typed loader
//! in this crate (`rules`, `authority`, `agents`, `gate_policy`,
//! `consistency_rules`, `capability_graph`) funnels through. Both follow the
//! same three steps: read the file, validate its shape against a JSON
//! Schema, then deserialize into the caller's target type.

use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading a policy or rule document.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The file could not be read.
    #[error("policy document io error at {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file's text could not be parsed as YAML.
    #[error("policy document yaml error at {path}: {source}")]
    Yaml {
        /// The path that failed to parse.
        path: String,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// The file's text could not be parsed as JSON.
    #[error("policy document json error at {path}: {source}")]
    Json {
        /// The path that failed to parse.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The document's shape did not satisfy its JSON Schema.
    #[error("policy document at {path} failed schema validation: {detail}")]
    Schema {
        /// The path that failed validation.
        path: String,
        /// The joined list of schema validation error messages.
        detail: String,
    },
    /// The schema itself failed to compile — a defect in this crate, not
    /// the document under validation.
    #[error("policy schema failed to compile: {0}")]
    InvalidSchema(String),
    /// The document matched its schema but could not be deserialized into
    /// the target type.
    #[error("policy document at {path} does not match the expected shape: {detail}")]
    Shape {
        /// The path whose content could not be deserialized.
        path: String,
        /// The deserialization failure detail.
        detail: String,
    },
}

fn validate_against_schema(path: &Path, schema: &Value, value: &Value) -> Result<(), PolicyError> {
    let compiled = JSONSchema::compile(schema)
        .map_err(|err| PolicyError::InvalidSchema(err.to_string()))?;
    if let Err(errors) = compiled.validate(value) {
        let detail = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        return Err(PolicyError::Schema {
            path: path.display().to_string(),
            detail,
        });
    }
    Ok(())
}

/// Reads `path` as YAML, schema-validates it, then deserializes into `T`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized into `T`.
pub fn load_yaml<T: DeserializeOwned>(path: &Path, schema: &Value) -> Result<T, PolicyError> {
    let text = fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| PolicyError::Yaml {
        path: path.display().to_string(),
        source,
    })?;
    validate_against_schema(path, schema, &value)?;
    serde_json::from_value(value).map_err(|err| PolicyError::Shape {
        path: path.display().to_string(),
        detail: err.to_string(),
    })
}

/// Reads `path` as JSON, schema-validates it, then deserializes into `T`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path, schema: &Value) -> Result<T, PolicyError> {
    let text = fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| PolicyError::Json {
        path: path.display().to_string(),
        source,
    })?;
    validate_against_schema(path, schema, &value)?;
    serde_json::from_value(value).map_err(|err| PolicyError::Shape {
        path: path.display().to_string(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write as _;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Sample {
        name: String,
    }

    fn schema() -> Value {
        serde_json::json!({
            "type": "object",
            "required": ["name"],
            "properties": {"name": {"type": "string"}}
        })
    }

    #[test]
    fn loads_valid_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "name: monitoring").expect("write");
        let sample: Sample = load_yaml(file.path(), &schema()).expect("load");
        assert_eq!(sample.name, "monitoring");
    }

    #[test]
    fn rejects_yaml_failing_schema() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "wrong_key: 1").expect("write");
        let err = load_yaml::<Sample>(file.path(), &schema()).expect_err("should fail");
        assert!(matches!(err, PolicyError::Schema { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_yaml::<Sample>(Path::new("/nonexistent/path.yaml"), &schema())
            .expect_err("should fail");
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
