//! # Temporary Workspace
//!
//! Evaluators may materialize per-fold training and test files. A `TempWorkspace`
//! owns the directory those files live in for the duration of one search run and
//! hands each candidate slot its own subdirectory, so evaluations running in
//! parallel never share files. The directory is removed when the workspace is
//! closed or dropped, including when a search fails part-way.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Result, ResultExt};

/// A scoped temporary directory with one scratch subdirectory per candidate slot.
#[derive(Debug)]
pub struct TempWorkspace {
    root: TempDir,
    slots: Vec<PathBuf>,
}

impl TempWorkspace {
    /// Creates the workspace and `slots` scratch subdirectories (at least one).
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn create(slots: usize) -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix("featsel-")
            .tempdir()
            .context("Failed to create temporary workspace")?;

        let slots = (0..slots.max(1))
            .map(|slot| {
                let path = root.path().join(format!("candidate-{slot}"));
                fs::create_dir(&path)?;
                Ok(path)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(path = %root.path().display(), slots = slots.len(), "created workspace");

        Ok(Self { root, slots })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Scratch directory for candidate `slot`. Slots beyond the configured count
    /// wrap around.
    pub fn slot_dir(&self, slot: usize) -> &Path {
        &self.slots[slot % self.slots.len()]
    }

    /// Deletes the workspace, reporting failures that `Drop` would swallow.
    pub fn close(self) -> Result<()> {
        let path = self.root.path().to_path_buf();
        self.root.close().context("Failed to delete temporary workspace")?;
        debug!(path = %path.display(), "deleted workspace");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_distinct_directories() {
        let workspace = TempWorkspace::create(3).unwrap();
        assert_eq!(workspace.num_slots(), 3);
        assert_ne!(workspace.slot_dir(0), workspace.slot_dir(1));
        assert!(workspace.slot_dir(2).is_dir());
        assert_eq!(workspace.slot_dir(3), workspace.slot_dir(0));
    }

    #[test]
    fn test_close_removes_directory() {
        let workspace = TempWorkspace::create(1).unwrap();
        let path = workspace.path().to_path_buf();
        fs::write(workspace.slot_dir(0).join("fold-0.csv"), "1,2,0\n").unwrap();
        workspace.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let path = {
            let workspace = TempWorkspace::create(2).unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_zero_slots_still_has_one() {
        let workspace = TempWorkspace::create(0).unwrap();
        assert_eq!(workspace.num_slots(), 1);
    }
}
