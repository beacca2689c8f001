//! Extraction layer: raw text out of PDF and DOCX files.
//!
//! This is where input files enter the comparison. Each file is read once,
//! checked against its declared format, and turned into a [`Document`]
//! holding the text in reading order. Nothing here normalizes text.
//!
//! ## What we do here
//!
//! - **Check the container** - magic bytes before any parser sees the file
//! - **PDF** - page tree via `lopdf`, text via `pdf-extract`, pages in order
//! - **DOCX** - body paragraphs from `word/document.xml`, tracked deletions
//!   excluded, tables skipped unless configured
//! - **Never abort the process** - parser panics become [`ExtractError::Parse`]
//! - **Log** - `extract_success` / `extract_failure` events with timings
//!
//! ## Main entry points
//!
//! [`extract_document`] for one file, [`extract_pair`] for the PDF/DOCX pair
//! of a comparison run.
//!
//! ```no_run
//! use std::path::Path;
//! use extract::{extract_pair, ExtractConfig};
//!
//! let (pdf, docx) = extract_pair(
//!     Path::new("paper.pdf"),
//!     Path::new("paper.docx"),
//!     &ExtractConfig::default(),
//! )?;
//! println!("{} pages, {} paragraphs", pdf.unit_count, docx.unit_count);
//! # Ok::<(), extract::ExtractError>(())
//! ```

use std::path::Path;
use std::thread;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn, Level};

mod config;
mod docx;
mod error;
mod pdf;
mod types;

pub use crate::config::{ConfigError, ExtractConfig};
pub use crate::error::ExtractError;
pub use crate::types::{Document, DocumentFormat, ExtractWarning};

/// Output of a format-specific extractor.
#[derive(Debug)]
pub(crate) struct Extracted {
    pub(crate) text: String,
    pub(crate) unit_count: usize,
    pub(crate) warnings: Vec<ExtractWarning>,
}

/// Read `path` and extract its text as `format`.
pub fn extract_document(
    path: &Path,
    format: DocumentFormat,
    cfg: &ExtractConfig,
) -> Result<Document, ExtractError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "extract.extract_document",
        path = %path.display(),
        format = %format
    );
    let _guard = span.enter();

    let result = read_file(path, format, cfg)
        .and_then(|bytes| extract_bytes(path, &bytes, format, cfg));
    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(document) => info!(
            chars = document.raw_text.chars().count(),
            units = document.unit_count,
            warnings = document.warnings.len(),
            elapsed_micros,
            "extract_success"
        ),
        Err(err) => warn!(
            error = %err,
            kind = err.kind(),
            elapsed_micros,
            "extract_failure"
        ),
    }
    result
}

/// Extract already-loaded file contents. `path` is only used for
/// identification and error messages.
pub fn extract_bytes(
    path: &Path,
    bytes: &[u8],
    format: DocumentFormat,
    cfg: &ExtractConfig,
) -> Result<Document, ExtractError> {
    let extracted = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(path, bytes)?,
        DocumentFormat::Docx => docx::extract_docx(path, bytes, cfg.include_tables)?,
    };

    let Extracted {
        text,
        unit_count,
        mut warnings,
    } = extracted;

    if text.trim().is_empty() {
        if !cfg.allow_empty {
            return Err(ExtractError::Empty {
                path: path.to_path_buf(),
                format,
            });
        }
        warn!(path = %path.display(), format = %format, "extract_empty_document");
        warnings.insert(0, ExtractWarning::EmptyDocument);
    }
    for warning in &warnings {
        if !matches!(warning, ExtractWarning::EmptyDocument) {
            warn!(path = %path.display(), warning = %warning, "extract_warning");
        }
    }

    Ok(Document {
        path: path.to_path_buf(),
        format,
        raw_text: text,
        extracted_at: Utc::now(),
        unit_count,
        byte_size: bytes.len() as u64,
        warnings,
    })
}

/// Extract the PDF and DOCX of one comparison run.
///
/// With `cfg.parallel` the two files are extracted on scoped threads; both
/// results are joined before this returns. The PDF error wins when both fail.
pub fn extract_pair(
    pdf_path: &Path,
    docx_path: &Path,
    cfg: &ExtractConfig,
) -> Result<(Document, Document), ExtractError> {
    if !cfg.parallel {
        let pdf = extract_document(pdf_path, DocumentFormat::Pdf, cfg)?;
        let docx = extract_document(docx_path, DocumentFormat::Docx, cfg)?;
        return Ok((pdf, docx));
    }

    let (pdf, docx) = thread::scope(|scope| {
        let pdf = scope.spawn(|| extract_document(pdf_path, DocumentFormat::Pdf, cfg));
        let docx = scope.spawn(|| extract_document(docx_path, DocumentFormat::Docx, cfg));
        (join(pdf), join(docx))
    });
    Ok((pdf?, docx?))
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn read_file(
    path: &Path,
    format: DocumentFormat,
    cfg: &ExtractConfig,
) -> Result<Vec<u8>, ExtractError> {
    let io_error = |source| ExtractError::Io {
        path: path.to_path_buf(),
        format,
        source,
    };
    if let Some(limit) = cfg.max_file_bytes {
        let size = std::fs::metadata(path).map_err(io_error)?.len();
        if size > limit {
            return Err(ExtractError::TooLarge {
                path: path.to_path_buf(),
                format,
                size,
                limit,
            });
        }
    }
    std::fs::read(path).map_err(io_error)
}
