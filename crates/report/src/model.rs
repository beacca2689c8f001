//! Report data. Built once per run and only read afterwards.

use std::path::PathBuf;

use canonical::{CanonicalizeConfig, CanonicalizedDocument};
use chrono::{DateTime, Utc};
use extract::{Document, DocumentFormat, ExtractWarning};
use serde::{Deserialize, Serialize};
use similarity::{ComparisonOutcome, CoverageStrategy, SentenceMatch, SimilarityConfig};

/// What the report shows about one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub extracted_at: DateTime<Utc>,
    /// Pages or paragraphs, see [`DocumentFormat::unit_name`].
    pub unit_count: usize,
    pub byte_size: u64,
    pub canonical_chars: usize,
    pub token_count: usize,
    pub sentence_count: usize,
    /// Version-aware identity of the canonical text.
    pub sha256_hex: String,
    pub warnings: Vec<ExtractWarning>,
}

impl DocumentSummary {
    pub fn new(document: &Document, canonical: &CanonicalizedDocument, sentence_count: usize) -> Self {
        Self {
            name: document.file_name(),
            path: document.path.clone(),
            format: document.format,
            extracted_at: document.extracted_at,
            unit_count: document.unit_count,
            byte_size: document.byte_size,
            canonical_chars: canonical.char_count(),
            token_count: canonical.tokens.len(),
            sentence_count,
            sha256_hex: canonical.sha256_hex.clone(),
            warnings: document.warnings.clone(),
        }
    }
}

/// Settings that shaped the metrics, echoed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSettings {
    pub sentence_threshold: f64,
    pub coverage_strategy: CoverageStrategy,
    /// Policy both documents were normalized with.
    pub normalization: CanonicalizeConfig,
}

impl ComparisonSettings {
    pub fn new(cfg: &SimilarityConfig, normalization: &CanonicalizeConfig) -> Self {
        Self {
            sentence_threshold: cfg.sentence_threshold,
            coverage_strategy: cfg.coverage_strategy,
            normalization: normalization.clone(),
        }
    }
}

/// Everything rendered into the HTML report and the JSON summary.
///
/// The diff in `outcome` holds byte ranges into `pdf_text` and `docx_text`,
/// the canonical texts of the two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub pdf: DocumentSummary,
    pub docx: DocumentSummary,
    pub settings: ComparisonSettings,
    pub outcome: ComparisonOutcome,
    pub pdf_text: String,
    pub docx_text: String,
    pub generated_at: DateTime<Utc>,
}

impl ComparisonReport {
    pub fn new(
        pdf: DocumentSummary,
        docx: DocumentSummary,
        settings: ComparisonSettings,
        outcome: ComparisonOutcome,
        pdf_text: String,
        docx_text: String,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pdf,
            docx,
            settings,
            outcome,
            pdf_text,
            docx_text,
            generated_at,
        }
    }

    /// Both canonical texts hash to the same identity.
    pub fn identical_after_normalization(&self) -> bool {
        self.pdf.sha256_hex == self.docx.sha256_hex
    }

    /// Unmatched PDF sentences, worst first.
    pub fn unmatched_sentences(&self) -> Vec<&SentenceMatch> {
        self.outcome.unmatched()
    }
}
