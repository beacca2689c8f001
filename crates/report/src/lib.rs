//! # Comparison reports
//!
//! Turns a finished comparison into two artifacts:
//!
//! - a self-contained HTML page ([`render_html`]) with a metrics table, the
//!   unmatched PDF sentences worst-first and an inline word diff of the
//!   canonical texts;
//! - a small JSON summary ([`summary_json`]) for CI steps and scripts.
//!
//! Rendering is deterministic: the same [`ComparisonReport`] always renders
//! to the same bytes, and only the `generated-at` line depends on the clock.
//!
//! [`write_report`] stages both files in their destination directories and
//! renames them into place only after both were written. If the summary
//! rename fails after the report landed, the report is removed again, so a
//! failed run leaves no partial report behind.

mod config;
mod error;
mod html;
mod model;
mod summary;
mod write;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn, Level};

pub use crate::config::ReportConfig;
pub use crate::error::ReportError;
pub use crate::html::{escape_html, percent, render_html};
pub use crate::model::{ComparisonReport, ComparisonSettings, DocumentSummary};
pub use crate::summary::{summary_json, summary_line, Summary, SUMMARY_FORMAT_VERSION};

/// Paths of the artifacts written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub html: PathBuf,
    pub summary: Option<PathBuf>,
}

/// Render and write the HTML report, plus the JSON summary when
/// `summary_path` is given.
pub fn write_report(
    report: &ComparisonReport,
    cfg: &ReportConfig,
    html_path: &Path,
    summary_path: Option<&Path>,
) -> Result<WrittenReport, ReportError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "report.write_report",
        html = %html_path.display()
    );
    let _guard = span.enter();

    let result = write_artifacts(report, cfg, html_path, summary_path);
    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(written) => info!(
            html = %written.html.display(),
            summary = ?written.summary,
            elapsed_micros,
            "report_written"
        ),
        Err(err) => warn!(error = %err, elapsed_micros, "report_failure"),
    }
    result
}

fn write_artifacts(
    report: &ComparisonReport,
    cfg: &ReportConfig,
    html_path: &Path,
    summary_path: Option<&Path>,
) -> Result<WrittenReport, ReportError> {
    cfg.validate()?;
    let html = render_html(report, cfg);
    let staged_html = write::stage(html_path, &html)?;
    let staged_summary = match summary_path {
        Some(path) => Some(write::stage(path, &summary_json(report)?)?),
        None => None,
    };

    let html = staged_html.commit()?;
    let summary = match staged_summary.map(write::Staged::commit).transpose() {
        Ok(summary) => summary,
        Err(err) => {
            // The report must not outlive a summary that failed to land.
            if let Err(remove_err) = std::fs::remove_file(&html) {
                warn!(html = %html.display(), error = %remove_err, "report_rollback_failed");
            }
            return Err(err);
        }
    };
    Ok(WrittenReport { html, summary })
}
