//! Recursive discovery of sync-conflict files

use super::error::{ConflictError, Result};
use super::{ConflictFinder, is_conflict_name};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds conflict copies by walking each root depth-first.
///
/// Hidden directories and ignore files get no special treatment: every entry
/// below a root is visited, and the skip list is the only filter. Entries are
/// visited in file-name order so the numbering of reports is stable between
/// runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkConflictFinder;

impl WalkConflictFinder {
    pub fn new() -> Self {
        Self
    }

    fn walk_root(root: &Path, skip: &[String], found: &mut Vec<PathBuf>) -> Result<()> {
        // Surface a missing root as an I/O error on the root itself
        std::fs::metadata(root).map_err(|e| ConflictError::Discovery {
            root: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| ConflictError::Discovery {
                root: root.to_path_buf(),
                reason: e.to_string(),
            })?;

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "Skipping file with non-UTF-8 name");
                continue;
            };
            if is_conflict_name(name) && !should_skip(entry.path(), skip) {
                found.push(entry.into_path());
            }
        }

        Ok(())
    }
}

impl ConflictFinder for WalkConflictFinder {
    fn find(&self, roots: &[PathBuf], skip: &[String]) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for root in roots {
            Self::walk_root(root, skip, &mut found)?;
        }
        Ok(found)
    }
}

/// Plain substring match against the full path
fn should_skip(path: &Path, skip: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    skip.iter().any(|s| path_str.contains(s.as_str()))
}
