//! Extracted document model.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared format of an input file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Guess the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }

    /// Name of the text units counted in [`Document::unit_count`].
    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::Pdf => "pages",
            Self::Docx => "paragraphs",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal findings recorded during extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractWarning {
    /// The file parsed but yielded no text.
    EmptyDocument,
    /// DOCX tables whose text was not collected.
    TablesSkipped { count: usize },
    /// PDF pages that produced no text (scanned images, figures).
    BlankPages { count: usize },
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::EmptyDocument => write!(f, "document contains no extractable text"),
            ExtractWarning::TablesSkipped { count } => {
                write!(f, "{count} table(s) skipped; their text is not compared")
            }
            ExtractWarning::BlankPages { count } => {
                write!(f, "{count} page(s) without extractable text")
            }
        }
    }
}

/// One extracted input file. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
    /// Text in reading order, before any normalization.
    pub raw_text: String,
    pub extracted_at: DateTime<Utc>,
    /// Pages for PDF, non-empty paragraphs for DOCX.
    pub unit_count: usize,
    pub byte_size: u64,
    pub warnings: Vec<ExtractWarning>,
}

impl Document {
    /// File name without directories, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}
