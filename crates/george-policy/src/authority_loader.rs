// crates/george-policy/src/authority_loader.rs
// ============================================================================
// Module: George Authority Matrix Loader
// Description: Loads `ops/authority_matrix.yaml`.
// Purpose: Feed the Authority component a validated `AuthorityMatrix`.
// Dependencies: crate::loader, crate::schemas, george-core
// ============================================================================

use std::path::Path;

use george_core::AuthorityMatrix;

use crate::loader::PolicyError;
use crate::loader::load_yaml;
use crate::schemas::authority_matrix_schema;

/// Loads the authority matrix from `path`.
///
/// # Errors
///
/// Returns [`PolicyError`] when the file cannot be read, parsed, schema
/// validated, or deserialized.
pub fn load_authority_matrix(path: &Path) -> Result<AuthorityMatrix, PolicyError> {
    load_yaml(path, &authority_matrix_schema())
}
