//! SyncConflictResolver - drives discovery, comparison and reporting

use super::error::Result;
use super::report::ReportFormat;
use super::{
    ConflictFinder, ContentComparer, DiffFormatter, ExactComparer, ObsidianFormatter,
    WalkConflictFinder, original_path_for,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What happened to a single conflict copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Identical to the original and removed from disk
    Deleted,

    /// Differs from the original; a diff report was written
    Reported,

    /// Not a conflict name, or comparison or report output failed; the file
    /// was skipped
    Failed,
}

/// Per-outcome counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub deleted: usize,
    pub reported: usize,
    pub failed: usize,
}

impl ResolveSummary {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Deleted => self.deleted += 1,
            Resolution::Reported => self.reported += 1,
            Resolution::Failed => self.failed += 1,
        }
    }

    /// Number of conflict copies processed
    pub fn total(&self) -> usize {
        self.deleted + self.reported + self.failed
    }
}

/// Resolves every conflict copy below a set of roots, one at a time.
///
/// Only a discovery failure aborts a run. Errors on individual files are
/// logged with both paths and the run continues with the next file.
#[derive(Debug, Clone)]
pub struct SyncConflictResolver<
    F = WalkConflictFinder,
    C = ExactComparer,
    D = ObsidianFormatter,
> {
    finder: F,
    comparer: C,
    formatter: D,
    format: ReportFormat,
}

impl SyncConflictResolver {
    /// Resolver wired with the filesystem-backed stages
    pub fn new() -> Self {
        Self::with_parts(WalkConflictFinder, ExactComparer, ObsidianFormatter)
    }
}

impl Default for SyncConflictResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, C, D> SyncConflictResolver<F, C, D>
where
    F: ConflictFinder,
    C: ContentComparer,
    D: DiffFormatter,
{
    /// Resolver wired with custom stages
    pub fn with_parts(finder: F, comparer: C, formatter: D) -> Self {
        Self {
            finder,
            comparer,
            formatter,
            format: ReportFormat::default(),
        }
    }

    /// Choose how reports are written to the output stream
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Find and resolve all conflict copies below `roots`.
    ///
    /// Reports go to `out` in discovery order, numbered from 1 by each file's
    /// position in that order.
    pub fn resolve(
        &self,
        roots: &[PathBuf],
        skip: &[String],
        out: &mut dyn Write,
    ) -> Result<ResolveSummary> {
        debug!(roots = roots.len(), "Starting sync conflict resolution");

        let conflicts = self.finder.find(roots, skip)?;

        let mut summary = ResolveSummary::default();
        for (i, conflict) in conflicts.iter().enumerate() {
            summary.record(self.resolve_one(conflict, i + 1, out));
        }

        debug!(
            deleted = summary.deleted,
            reported = summary.reported,
            failed = summary.failed,
            "Finished sync conflict resolution"
        );
        Ok(summary)
    }

    /// Resolve a single conflict copy
    pub fn resolve_one(&self, conflict: &Path, sequence: usize, out: &mut dyn Write) -> Resolution {
        let original = original_path_for(conflict);

        // A name without the conflict suffix maps onto itself
        if original == conflict {
            error!(
                conflict_file = %conflict.display(),
                "Not a sync conflict file, leaving it alone"
            );
            return Resolution::Failed;
        }

        let deleted = match self.comparer.compare_and_delete(conflict, &original) {
            Ok(deleted) => deleted,
            Err(e) => {
                error!(
                    conflict_file = %conflict.display(),
                    original_file = %original.display(),
                    error = %e,
                    "Failed to compare and delete files"
                );
                return Resolution::Failed;
            }
        };

        let resolution = if deleted {
            info!(conflict_file = %conflict.display(), "Deleted identical sync conflict file");
            Resolution::Deleted
        } else {
            let report = self.formatter.format(conflict, &original, sequence);
            match self.format.write_report(&report, out) {
                Ok(()) => Resolution::Reported,
                Err(e) => {
                    error!(
                        conflict_file = %conflict.display(),
                        original_file = %original.display(),
                        error = %e,
                        "Failed to write diff report"
                    );
                    Resolution::Failed
                }
            }
        };

        if let Err(e) = self.format.write_separator(out) {
            error!(error = %e, "Failed to write report separator");
        }

        resolution
    }
}
