//! Configuration for the extraction stage.
//!
//! ```rust
//! use extract::ExtractConfig;
//!
//! let config = ExtractConfig::default();
//! config.validate().expect("defaults are valid");
//! assert!(config.allow_empty);
//! assert!(!config.include_tables);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for PDF and DOCX extraction.
///
/// # Serialization
///
/// ```yaml
/// allow_empty: true
/// include_tables: false
/// parallel: false
/// max_file_bytes: 104857600
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Accept documents that parse but contain no text.
    ///
    /// When `true` such a document carries
    /// [`ExtractWarning::EmptyDocument`](crate::ExtractWarning::EmptyDocument)
    /// and the comparison proceeds; when `false` extraction fails with
    /// [`ExtractError::Empty`](crate::ExtractError::Empty).
    pub allow_empty: bool,

    /// Collect text from DOCX tables.
    ///
    /// Off by default: LaTeX-produced PDFs usually render tables as figures,
    /// so table text in the Word copy would only show up as insertions.
    /// Skipped tables are reported as a warning, never dropped silently.
    pub include_tables: bool,

    /// Extract the PDF and the DOCX on two scoped threads.
    pub parallel: bool,

    /// Reject input files larger than this many bytes before parsing.
    pub max_file_bytes: Option<u64>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            allow_empty: true,
            include_tables: false,
            parallel: false,
            max_file_bytes: None,
        }
    }
}

/// Invalid [`ExtractConfig`] values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `max_file_bytes` of zero would reject every file.
    #[error("max_file_bytes must be greater than zero")]
    ZeroFileLimit,
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == Some(0) {
            return Err(ConfigError::ZeroFileLimit);
        }
        Ok(())
    }
}
