//! Diff reports for conflict copies that differ from their original
//!
//! A report gives the user everything needed to settle a conflict by hand: a
//! `diff` invocation that can be pasted into a shell, both absolute paths, and
//! a pair of `open` commands that bring both notes up in Obsidian.

use super::DiffFormatter;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Fixed arguments of the suggested diff invocation
const DIFF_COMMAND: &str = "diff --unified --ignore-all-space";

/// Deep-link prefix understood by Obsidian
const OBSIDIAN_OPEN_URI: &str = "obsidian://open?path=";

/// Report for a single conflict copy whose content differs from its original
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// 1-based position of the conflict copy in discovery order
    pub sequence: usize,

    pub conflict_path: PathBuf,
    pub original_path: PathBuf,

    /// Absolute forms, or the paths as given if they could not be resolved
    pub absolute_conflict_path: PathBuf,
    pub absolute_original_path: PathBuf,

    /// Shell-ready `diff` command line
    pub diff_command: String,

    /// Both `open` commands joined with `; `
    pub open_command: String,
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# diff: {}", self.sequence)?;
        writeln!(f, "{}", self.diff_command)?;
        writeln!(f, "{}", self.absolute_conflict_path.display())?;
        writeln!(f, "{}", self.absolute_original_path.display())?;
        writeln!(f, "{}", self.open_command)
    }
}

/// How reports are written to the output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable block followed by a blank line
    #[default]
    Text,

    /// One compact JSON object per line
    Json,
}

impl ReportFormat {
    /// Write a single report
    pub fn write_report(self, report: &DiffReport, out: &mut dyn Write) -> io::Result<()> {
        match self {
            ReportFormat::Text => write!(out, "{}", report),
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, report).map_err(io::Error::other)?;
                writeln!(out)
            }
        }
    }

    /// Write the separator that follows each processed conflict copy
    pub fn write_separator(self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            ReportFormat::Text => writeln!(out),
            ReportFormat::Json => Ok(()),
        }
    }
}

/// Formats reports with Obsidian deep links
#[derive(Debug, Clone, Copy, Default)]
pub struct ObsidianFormatter;

impl ObsidianFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl DiffFormatter for ObsidianFormatter {
    fn format(&self, conflict: &Path, original: &Path, sequence: usize) -> DiffReport {
        let absolute_conflict_path = absolute_or_given(conflict);
        let absolute_original_path = absolute_or_given(original);

        let diff_command = format!(
            "{} {} {}",
            DIFF_COMMAND,
            shell_quote(&conflict.to_string_lossy()),
            shell_quote(&original.to_string_lossy()),
        );

        let open_command = format!(
            "open {}{}; open {}{}",
            OBSIDIAN_OPEN_URI,
            absolute_original_path.display(),
            OBSIDIAN_OPEN_URI,
            absolute_conflict_path.display(),
        );

        DiffReport {
            sequence,
            conflict_path: conflict.to_path_buf(),
            original_path: original.to_path_buf(),
            absolute_conflict_path,
            absolute_original_path,
            diff_command,
            open_command,
        }
    }
}

/// Resolve against the current directory without touching the filesystem
fn absolute_or_given(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(absolute) => clean(&absolute),
        Err(_) => path.to_path_buf(),
    }
}

/// Lexically drop `.` and fold each `..` into its parent; `..` at the root
/// stays at the root
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Wrap in single quotes, closing and reopening around embedded quotes
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &DiffReport, format: ReportFormat) -> String {
        let mut out = Vec::new();
        format.write_report(report, &mut out).unwrap();
        format.write_separator(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn quotes_plain_paths() {
        assert_eq!(shell_quote("/vault/Notes.md"), "'/vault/Notes.md'");
    }

    #[test]
    fn escapes_embedded_single_quotes() {
        assert_eq!(shell_quote("Bob's notes.md"), r#"'Bob'"'"'s notes.md'"#);
        assert_eq!(shell_quote("''"), r#"''"'"''"'"''"#);
    }

    #[test]
    fn text_report_has_exact_shape() {
        let conflict = Path::new("/vault/Notes.sync-conflict-20240818-215425-I2NUVZU.md");
        let original = Path::new("/vault/Notes.md");

        let report = ObsidianFormatter::new().format(conflict, original, 3);

        let expected = "\
# diff: 3
diff --unified --ignore-all-space '/vault/Notes.sync-conflict-20240818-215425-I2NUVZU.md' '/vault/Notes.md'
/vault/Notes.sync-conflict-20240818-215425-I2NUVZU.md
/vault/Notes.md
open obsidian://open?path=/vault/Notes.md; open obsidian://open?path=/vault/Notes.sync-conflict-20240818-215425-I2NUVZU.md

";
        assert_eq!(render(&report, ReportFormat::Text), expected);
    }

    #[test]
    fn relative_paths_are_made_absolute_but_diff_keeps_them() {
        let conflict = Path::new("notes/a.sync-conflict-20240818-215425-X.md");
        let original = Path::new("notes/a.md");

        let report = ObsidianFormatter::new().format(conflict, original, 1);

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(report.absolute_conflict_path, cwd.join(conflict));
        assert_eq!(report.absolute_original_path, cwd.join(original));
        assert_eq!(
            report.diff_command,
            "diff --unified --ignore-all-space 'notes/a.sync-conflict-20240818-215425-X.md' 'notes/a.md'"
        );
    }

    #[test]
    fn parent_components_are_folded() {
        assert_eq!(
            absolute_or_given(Path::new("/vault/../notes/./a.md")),
            PathBuf::from("/notes/a.md")
        );
        assert_eq!(absolute_or_given(Path::new("/../a.md")), PathBuf::from("/a.md"));

        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.parent().unwrap_or(&cwd);
        assert_eq!(absolute_or_given(Path::new("../vault/a.md")), parent.join("vault/a.md"));
    }

    #[test]
    fn report_paths_for_parent_relative_roots_are_clean() {
        let report = ObsidianFormatter::new().format(
            Path::new("/v/sub/../a.sync-conflict-20240818-215425-X.md"),
            Path::new("/v/sub/../a.md"),
            1,
        );

        assert_eq!(report.absolute_original_path, PathBuf::from("/v/a.md"));
        assert_eq!(
            report.open_command,
            "open obsidian://open?path=/v/a.md; open obsidian://open?path=/v/a.sync-conflict-20240818-215425-X.md"
        );
        assert!(report.diff_command.contains("'/v/sub/../a.md'"));
    }

    #[test]
    fn unresolvable_path_falls_back_to_given() {
        assert_eq!(absolute_or_given(Path::new("")), PathBuf::new());
    }

    #[test]
    fn json_report_is_a_single_line() {
        let report = ObsidianFormatter::new().format(Path::new("/v/a.x.md"), Path::new("/v/a.md"), 7);

        let rendered = render(&report, ReportFormat::Json);

        assert_eq!(rendered.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(rendered.trim_end()).unwrap();
        assert_eq!(value["sequence"], 7);
        assert_eq!(value["absolute_original_path"], "/v/a.md");
        assert_eq!(
            value["open_command"],
            "open obsidian://open?path=/v/a.md; open obsidian://open?path=/v/a.x.md"
        );
    }
}
