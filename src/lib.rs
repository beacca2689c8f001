//! Workspace umbrella crate for doccmp.
//!
//! Compares the text of a PDF manuscript with its Word (DOCX) conversion.
//! One run extracts both files, normalizes them with a shared policy,
//! computes similarity metrics and sentence coverage, and writes an HTML
//! report plus a JSON summary.
//!
//! ```no_run
//! use std::path::Path;
//! use doccmp::{run, ComparatorConfig, OutputPaths};
//!
//! let output = run(
//!     Path::new("paper.pdf"),
//!     Path::new("paper.docx"),
//!     &ComparatorConfig::default(),
//!     &OutputPaths::default(),
//! )?;
//! println!("coverage {:.2}", output.run.metrics().sentence_coverage);
//! # Ok::<(), doccmp::PipelineError>(())
//! ```

pub mod config;

pub use crate::config::{
    ComparatorConfig, ConfigLoadError, LogFormat, LoggingConfig, normalize_threshold,
};
pub use canonical::{
    CanonicalError, CanonicalizeConfig, CanonicalizedDocument, SegmentConfig, SentenceUnit,
    canonicalize, normalize, segment,
};
pub use extract::{
    Document, DocumentFormat, ExtractConfig, ExtractError, ExtractWarning, extract_document,
    extract_pair,
};
pub use report::{
    ComparisonReport, ComparisonSettings, DocumentSummary, ReportConfig, ReportError, Summary,
    WrittenReport, render_html, summary_json, summary_line, write_report,
};
pub use similarity::{
    ComparisonOutcome, CoverageStrategy, DiffSpan, DiffTag, SentenceMatch, SimilarityConfig,
    SimilarityMetrics, compare, compare_with_details, diff_texts,
};

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{Level, info, warn};

/// Fatal errors of a comparison run. Each names the file (when there is
/// one) and the operation that failed.
#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigLoadError),
    Extract(ExtractError),
    Canonical {
        document: String,
        source: CanonicalError,
    },
    Report(ReportError),
}

impl PipelineError {
    /// The operation that failed, for user-facing messages.
    pub fn operation(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "load configuration",
            PipelineError::Extract(_) => "extract text",
            PipelineError::Canonical { .. } => "normalize text",
            PipelineError::Report(_) => "write report",
        }
    }

    /// The file involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PipelineError::Extract(err) => Some(err.path()),
            PipelineError::Report(ReportError::Write { path, .. }) => Some(path),
            PipelineError::Config(ConfigLoadError::FileRead { path, .. }) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(err) => write!(f, "configuration failure: {err}"),
            PipelineError::Extract(err) => write!(f, "extraction failure: {err}"),
            PipelineError::Canonical { document, source } => {
                write!(f, "canonicalization failure for {document}: {source}")
            }
            PipelineError::Report(err) => write!(f, "report failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Config(err) => Some(err),
            PipelineError::Extract(err) => Some(err),
            PipelineError::Canonical { source, .. } => Some(source),
            PipelineError::Report(err) => Some(err),
        }
    }
}

impl From<ConfigLoadError> for PipelineError {
    fn from(value: ConfigLoadError) -> Self {
        PipelineError::Config(value)
    }
}

impl From<ExtractError> for PipelineError {
    fn from(value: ExtractError) -> Self {
        PipelineError::Extract(value)
    }
}

impl From<ReportError> for PipelineError {
    fn from(value: ReportError) -> Self {
        PipelineError::Report(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_extract(&self, latency: Duration, result: Result<(), &ExtractError>);
    fn record_canonical(&self, latency: Duration, result: Result<(), &CanonicalError>);
    fn record_compare(&self, latency: Duration, metrics: &SimilarityMetrics);
    fn record_report(&self, latency: Duration, result: Result<(), &ReportError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_extract(self, result: Result<(), &ExtractError>) {
        self.recorder.record_extract(self.start.elapsed(), result);
    }

    fn record_canonical(self, result: Result<(), &CanonicalError>) {
        self.recorder.record_canonical(self.start.elapsed(), result);
    }

    fn record_compare(self, metrics: &SimilarityMetrics) {
        self.recorder.record_compare(self.start.elapsed(), metrics);
    }

    fn record_report(self, result: Result<(), &ReportError>) {
        self.recorder.record_report(self.start.elapsed(), result);
    }
}

/// Where [`run`] writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub report: PathBuf,
    /// JSON summary; `None` skips it.
    pub summary: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            report: PathBuf::from("compare_report.html"),
            summary: Some(PathBuf::from("compare_summary.json")),
        }
    }
}

/// Everything produced by [`compare_files`].
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub pdf: Document,
    pub docx: Document,
    pub pdf_canonical: CanonicalizedDocument,
    pub docx_canonical: CanonicalizedDocument,
    pub report: ComparisonReport,
}

impl ComparisonRun {
    pub fn metrics(&self) -> &SimilarityMetrics {
        &self.report.outcome.metrics
    }
}

/// Result of [`run`]: the comparison and the files written for it.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub run: ComparisonRun,
    pub written: WrittenReport,
}

/// Extract, normalize and compare a PDF/DOCX pair. Writes nothing.
pub fn compare_files(
    pdf_path: &Path,
    docx_path: &Path,
    cfg: &ComparatorConfig,
) -> Result<ComparisonRun, PipelineError> {
    cfg.validate()?;
    let span = tracing::span!(
        Level::INFO,
        "doccmp.compare_files",
        pdf = %pdf_path.display(),
        docx = %docx_path.display()
    );
    let _guard = span.enter();

    let extract_metrics = MetricsSpan::start();
    let (pdf, docx) = match extract_pair(pdf_path, docx_path, &cfg.extract) {
        Ok(pair) => {
            if let Some(timer) = extract_metrics {
                timer.record_extract(Ok(()));
            }
            pair
        }
        Err(err) => {
            if let Some(timer) = extract_metrics {
                timer.record_extract(Err(&err));
            }
            return Err(PipelineError::Extract(err));
        }
    };

    let pdf_canonical = canonicalize_document(&pdf, &cfg.canonical)?;
    let docx_canonical = canonicalize_document(&docx, &cfg.canonical)?;

    let similarity_cfg = cfg.similarity_config();
    let pdf_sentences: Vec<SentenceUnit> = pdf_canonical.sentences(&cfg.segment).collect();
    let docx_sentence_count = docx_canonical.sentences(&cfg.segment).count();

    let compare_metrics = MetricsSpan::start();
    let outcome = compare_with_details(
        &pdf_canonical.canonical_text,
        &docx_canonical.canonical_text,
        &pdf_sentences,
        &similarity_cfg,
    );
    if let Some(timer) = compare_metrics {
        timer.record_compare(&outcome.metrics);
    }

    let report = ComparisonReport::new(
        DocumentSummary::new(&pdf, &pdf_canonical, pdf_sentences.len()),
        DocumentSummary::new(&docx, &docx_canonical, docx_sentence_count),
        ComparisonSettings::new(&similarity_cfg, &cfg.canonical),
        outcome,
        pdf_canonical.canonical_text.clone(),
        docx_canonical.canonical_text.clone(),
        Utc::now(),
    );

    Ok(ComparisonRun {
        pdf,
        docx,
        pdf_canonical,
        docx_canonical,
        report,
    })
}

/// [`compare_files`], then write the HTML report and JSON summary.
///
/// Nothing is written when any stage fails.
pub fn run(
    pdf_path: &Path,
    docx_path: &Path,
    cfg: &ComparatorConfig,
    paths: &OutputPaths,
) -> Result<RunOutput, PipelineError> {
    let run = compare_files(pdf_path, docx_path, cfg)?;

    let report_metrics = MetricsSpan::start();
    let written = match write_report(
        &run.report,
        &cfg.report,
        &paths.report,
        paths.summary.as_deref(),
    ) {
        Ok(written) => {
            if let Some(timer) = report_metrics {
                timer.record_report(Ok(()));
            }
            written
        }
        Err(err) => {
            if let Some(timer) = report_metrics {
                timer.record_report(Err(&err));
            }
            return Err(PipelineError::Report(err));
        }
    };

    Ok(RunOutput { run, written })
}

/// Normalize and compare two already-extracted texts.
///
/// Same stages as [`compare_files`] minus extraction; useful when the text
/// comes from elsewhere.
pub fn compare_texts(
    pdf_text: &str,
    docx_text: &str,
    cfg: &ComparatorConfig,
) -> Result<ComparisonOutcome, PipelineError> {
    cfg.validate()?;
    let canonicalize_text = |id: &str, text: &str| {
        canonicalize(id, text, &cfg.canonical).map_err(|source| PipelineError::Canonical {
            document: id.to_string(),
            source,
        })
    };
    let pdf = canonicalize_text("pdf", pdf_text)?;
    let docx = canonicalize_text("docx", docx_text)?;
    let sentences: Vec<SentenceUnit> = pdf.sentences(&cfg.segment).collect();
    Ok(compare_with_details(
        &pdf.canonical_text,
        &docx.canonical_text,
        &sentences,
        &cfg.similarity_config(),
    ))
}

fn canonicalize_document(
    document: &Document,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedDocument, PipelineError> {
    let start = Instant::now();
    let canonical_metrics = MetricsSpan::start();
    let name = document.file_name();
    match canonicalize(&name, &document.raw_text, cfg) {
        Ok(doc) => {
            if let Some(timer) = canonical_metrics {
                timer.record_canonical(Ok(()));
            }
            info!(
                document = %name,
                format = %document.format,
                chars = doc.char_count(),
                tokens = doc.tokens.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "canonicalize_success"
            );
            Ok(doc)
        }
        Err(err) => {
            if let Some(timer) = canonical_metrics {
                timer.record_canonical(Err(&err));
            }
            warn!(document = %name, error = %err, "canonicalize_failure");
            Err(PipelineError::Canonical {
                document: document.path.display().to_string(),
                source: err,
            })
        }
    }
}
