//! Sync-conflict discovery and resolution
//!
//! This module finds sync-conflict copies of Markdown notes, removes the ones
//! whose bytes match the original note, and formats a diff report for the
//! rest. Each stage sits behind a small trait so the resolver can be driven
//! with test doubles.

mod comparer;
mod error;
mod finder;
mod report;
mod resolver;

pub use comparer::ExactComparer;
pub use error::{ConflictError, Result as ConflictResult};
pub use finder::WalkConflictFinder;
pub use report::{DiffReport, ObsidianFormatter, ReportFormat};
pub use resolver::{ResolveSummary, Resolution, SyncConflictResolver};

use regex::Regex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Suffix left by Syncthing on conflicting copies of a Markdown note.
///
/// Digit and word classes are spelled out so only ASCII characters qualify.
pub const CONFLICT_PATTERN: &str = r"\.sync-conflict-[0-9]{8}-[0-9]{6}-[0-9A-Za-z_]+\.md$";

/// Extension put back in place of the conflict suffix
const PLAIN_EXTENSION: &str = ".md";

static CONFLICT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CONFLICT_PATTERN).expect("conflict pattern is a valid regex"));

/// Check whether a base file name carries the sync-conflict suffix
pub fn is_conflict_name(name: &str) -> bool {
    CONFLICT_SUFFIX.is_match(name)
}

/// Derive the path of the note a conflict copy would have synced with.
///
/// `Notes.sync-conflict-20240818-215425-I2NUVZU.md` becomes `Notes.md` in the
/// same directory. Only the file name is rewritten; a name without the
/// suffix is returned unchanged, so applying this twice is the same as once.
pub fn original_path_for(conflict: &Path) -> PathBuf {
    let Some(name) = conflict.file_name().and_then(|n| n.to_str()) else {
        return conflict.to_path_buf();
    };

    match CONFLICT_SUFFIX.replace(name, PLAIN_EXTENSION) {
        Cow::Borrowed(_) => conflict.to_path_buf(),
        Cow::Owned(original) => conflict.with_file_name(original),
    }
}

// ============================================================================
// Stage contracts
// ============================================================================

/// Locates conflict copies below a set of root directories
pub trait ConflictFinder {
    /// Walk every root and return matching files in traversal order.
    ///
    /// Files whose full path contains any of `skip` are left out; an empty
    /// entry is a substring of every path. The whole call fails if any root
    /// cannot be walked.
    fn find(&self, roots: &[PathBuf], skip: &[String]) -> ConflictResult<Vec<PathBuf>>;
}

/// Compares a conflict copy with its original and removes identical copies
pub trait ContentComparer {
    /// Returns `true` when the copy was identical and has been deleted
    fn compare_and_delete(&self, conflict: &Path, original: &Path) -> ConflictResult<bool>;
}

/// Turns a conflict/original pair into a human-readable report
pub trait DiffFormatter {
    fn format(&self, conflict: &Path, original: &Path, sequence: usize) -> DiffReport;
}

impl<T: ConflictFinder + ?Sized> ConflictFinder for &T {
    fn find(&self, roots: &[PathBuf], skip: &[String]) -> ConflictResult<Vec<PathBuf>> {
        (**self).find(roots, skip)
    }
}

impl<T: ContentComparer + ?Sized> ContentComparer for &T {
    fn compare_and_delete(&self, conflict: &Path, original: &Path) -> ConflictResult<bool> {
        (**self).compare_and_delete(conflict, original)
    }
}

impl<T: DiffFormatter + ?Sized> DiffFormatter for &T {
    fn format(&self, conflict: &Path, original: &Path, sequence: usize) -> DiffReport {
        (**self).format(conflict, original, sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFLICT: &str = "Notes.sync-conflict-20240818-215425-I2NUVZU.md";

    #[test]
    fn matches_syncthing_conflict_names() {
        assert!(is_conflict_name(CONFLICT));
        assert!(is_conflict_name("a b.sync-conflict-20240101-000000-X_1.md"));
        assert!(is_conflict_name(".sync-conflict-20240101-000000-A.md"));
    }

    #[test]
    fn rejects_near_misses() {
        assert!(!is_conflict_name("Notes.md"));
        assert!(!is_conflict_name("Notes.sync-conflict-2024081-215425-I2NUVZU.md"));
        assert!(!is_conflict_name("Notes.sync-conflict-20240818-21542-I2NUVZU.md"));
        assert!(!is_conflict_name("Notes.sync-conflict-20240818-215425-.md"));
        assert!(!is_conflict_name("Notes.sync-conflict-20240818-215425-I2NUVZU.txt"));
        assert!(!is_conflict_name("Notes.sync-conflict-20240818-215425-I2NUVZU.md.bak"));
        assert!(!is_conflict_name("Notes.sync-conflict-20240818-215425-I2-NUVZU.md"));
        // Arabic-Indic digits are not accepted in the timestamp
        assert!(!is_conflict_name("Notes.sync-conflict-٢٠٢٤٠٨١٨-215425-I2NUVZU.md"));
    }

    #[test]
    fn original_path_strips_conflict_suffix() {
        let conflict = Path::new("/vault/daily").join(CONFLICT);
        assert_eq!(original_path_for(&conflict), Path::new("/vault/daily/Notes.md"));
    }

    #[test]
    fn original_path_is_idempotent() {
        let conflict = Path::new("vault").join(CONFLICT);
        let once = original_path_for(&conflict);
        assert_eq!(original_path_for(&once), once);
    }

    #[test]
    fn original_path_only_rewrites_file_name() {
        let conflict = Path::new("x.sync-conflict-20240818-215425-AAA.md").join(CONFLICT);
        assert_eq!(
            original_path_for(&conflict),
            Path::new("x.sync-conflict-20240818-215425-AAA.md/Notes.md")
        );
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(original_path_for(Path::new("a/Notes.md")), Path::new("a/Notes.md"));
        assert_eq!(original_path_for(Path::new("/")), Path::new("/"));
    }
}
