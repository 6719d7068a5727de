// crates/george-cli/src/sink.rs
// ============================================================================
// Module: George Working-Tree Change-Set Sink
// Description: Writes a Self-Healing change set to disk for human review.
// Purpose: The CLI's concrete `ChangeSetSink`, proposing files under a
//          review directory rather than committing or deploying anything
//          (§4.9, §9 "explicit collaborator interface").
// Dependencies: george-core::interfaces
// ============================================================================

//! ## Overview
//! Every proposed file is written beneath
//! `<root>/ops/self_heal_proposals/<branch>/<relative-path>`, preserving the
//! proposed file's own path so a reviewer can diff it directly against the
//! live artifact it would replace. Nothing under `ops/` outside that review
//! directory is ever touched by this sink.

use std::path::Path;
use std::path::PathBuf;

use george_core::interfaces::ChangeSet;
use george_core::interfaces::ChangeSetError;
use george_core::interfaces::ChangeSetSink;

/// Writes proposed change sets beneath `root/ops/self_heal_proposals/`.
#[derive(Debug, Clone)]
pub struct WorkingTreeChangeSetSink {
    root: PathBuf,
}

impl WorkingTreeChangeSetSink {
    /// Builds a sink rooted at `root` (the same root [`george_core::paths::PathConfig`]
    /// resolves `ops/` against).
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    fn review_dir(&self, branch: &str) -> PathBuf {
        self.root.join("ops").join("self_heal_proposals").join(branch)
    }
}

impl ChangeSetSink for WorkingTreeChangeSetSink {
    fn propose(&self, change_set: &ChangeSet) -> Result<(), ChangeSetError> {
        let review_dir = self.review_dir(&change_set.branch);
        std::fs::create_dir_all(&review_dir)
            .map_err(|err| ChangeSetError::Failed(err.to_string()))?;

        for file in &change_set.files {
            let relative = Path::new(&file.path)
                .file_name()
                .map_or_else(|| PathBuf::from(&file.path), PathBuf::from);
            let destination = review_dir.join(relative);
            std::fs::write(&destination, &file.contents)
                .map_err(|err| ChangeSetError::Failed(err.to_string()))?;
        }

        let summary_path = review_dir.join("SUMMARY.txt");
        std::fs::write(&summary_path, &change_set.summary)
            .map_err(|err| ChangeSetError::Failed(err.to_string()))?;
        Ok(())
    }
}
