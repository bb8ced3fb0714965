//! Byte-for-byte comparison of a conflict copy against its original

use super::ContentComparer;
use super::error::{ConflictError, Result};
use std::fs;
use std::path::Path;

/// Deletes a conflict copy only when its bytes equal the original's.
///
/// There is no fuzzy matching: whitespace or line-ending differences keep the
/// copy on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactComparer;

impl ExactComparer {
    pub fn new() -> Self {
        Self
    }
}

impl ContentComparer for ExactComparer {
    fn compare_and_delete(&self, conflict: &Path, original: &Path) -> Result<bool> {
        let conflict_content = read(conflict)?;
        let original_content = read(original)?;

        if conflict_content != original_content {
            return Ok(false);
        }

        fs::remove_file(conflict).map_err(|source| ConflictError::Delete {
            path: conflict.to_path_buf(),
            source,
        })?;
        Ok(true)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ConflictError::Read {
        path: path.to_path_buf(),
        source,
    })
}
