//! Machine-readable results for callers that should not parse the HTML.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use similarity::{CoverageStrategy, SimilarityMetrics};

use crate::error::ReportError;
use crate::model::ComparisonReport;

/// Bumped whenever a summary field is renamed or removed.
pub const SUMMARY_FORMAT_VERSION: u32 = 1;

/// Contents of `compare_summary.json`. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub format_version: u32,
    pub pdf: String,
    pub docx: String,
    pub char_ratio: f64,
    pub token_fuzzy_ratio: f64,
    pub sentence_coverage: f64,
    pub total_sentences: usize,
    pub matched_sentences: usize,
    pub docx_sentences: usize,
    pub identical_after_normalization: bool,
    pub pdf_sha256: String,
    pub docx_sha256: String,
    pub sentence_threshold: f64,
    pub coverage_strategy: CoverageStrategy,
    pub canonical_version: u32,
    pub generated_at: DateTime<Utc>,
}

impl Summary {
    pub fn from_report(report: &ComparisonReport) -> Self {
        let metrics = &report.outcome.metrics;
        Self {
            format_version: SUMMARY_FORMAT_VERSION,
            pdf: report.pdf.name.clone(),
            docx: report.docx.name.clone(),
            char_ratio: metrics.char_ratio,
            token_fuzzy_ratio: metrics.token_fuzzy_ratio,
            sentence_coverage: metrics.sentence_coverage,
            total_sentences: metrics.total_sentences,
            matched_sentences: metrics.matched_sentences,
            docx_sentences: report.docx.sentence_count,
            identical_after_normalization: report.identical_after_normalization(),
            pdf_sha256: report.pdf.sha256_hex.clone(),
            docx_sha256: report.docx.sha256_hex.clone(),
            sentence_threshold: report.settings.sentence_threshold,
            coverage_strategy: report.settings.coverage_strategy,
            canonical_version: report.settings.normalization.version,
            generated_at: report.generated_at,
        }
    }
}

/// Pretty-printed JSON summary, newline-terminated.
pub fn summary_json(report: &ComparisonReport) -> Result<String, ReportError> {
    let mut json = serde_json::to_string_pretty(&Summary::from_report(report))?;
    json.push('\n');
    Ok(json)
}

/// The one-line summary printed on stdout.
///
/// ```rust
/// use report::summary_line;
/// use similarity::SimilarityMetrics;
///
/// let metrics = SimilarityMetrics {
///     char_ratio: 0.9731,
///     token_fuzzy_ratio: 0.98,
///     sentence_coverage: 0.5,
///     total_sentences: 2,
///     matched_sentences: 1,
/// };
/// assert_eq!(
///     summary_line(&metrics),
///     "Summary: char_ratio=97.31 token_ratio=98.00 sentence_coverage=50.00 matched_sentences=1/2"
/// );
/// ```
pub fn summary_line(metrics: &SimilarityMetrics) -> String {
    format!(
        "Summary: char_ratio={:.2} token_ratio={:.2} sentence_coverage={:.2} matched_sentences={}/{}",
        metrics.char_ratio * 100.0,
        metrics.token_fuzzy_ratio * 100.0,
        metrics.sentence_coverage * 100.0,
        metrics.matched_sentences,
        metrics.total_sentences
    )
}
