use lessmay::config;
use lessmay::{ConflictResult, ReportFormat, ResolveSummary, Settings, SyncConflictResolver};
use std::path::PathBuf;
use tracing::info;

/// Turn command-line directories into roots, falling back to the default vault
pub fn root_paths(dirs: &[String], settings: &Settings) -> config::Result<Vec<PathBuf>> {
    if dirs.is_empty() {
        return Ok(vec![settings.resolved_default_path()?]);
    }
    dirs.iter().map(|d| config::expand_tilde(d)).collect()
}

/// Run the show-conflicts command over stdout
pub fn run_show_conflicts(
    roots: &[PathBuf],
    skip_paths: &[String],
    json: bool,
) -> ConflictResult<ResolveSummary> {
    info!("Running show-conflicts command");

    let format = if json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    let resolver = SyncConflictResolver::new().with_report_format(format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    resolver.resolve(roots, skip_paths, &mut out)
}
