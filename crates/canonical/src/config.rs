//! Configuration types for the normalization and segmentation stages.
//!
//! [`CanonicalizeConfig`] controls how raw extracted text is turned into
//! canonical text and [`SegmentConfig`] controls how canonical text is split
//! into sentence units.
//!
//! # Versioning
//!
//! The `version` field is part of the identity hash of every canonical
//! document. Any change to normalization behavior (even bug fixes) must be
//! accompanied by a version bump so reports produced by different builds are
//! never silently compared against each other.
//!
//! # Shared policy
//!
//! A comparison is only meaningful when both documents were normalized with
//! the same configuration. Callers create one config per run and pass it to
//! both [`canonicalize`](crate::canonicalize) calls.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.strip_hyphenation);
//! assert!(!config.strip_punctuation);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalization pipeline.
///
/// Whitespace collapsing, Unicode NFKC normalization, and case folding are
/// always applied; the flags below only toggle the optional steps.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "fold_typography": true,
///   "drop_page_numbers": true,
///   "drop_heading_lines": true,
///   "strip_hyphenation": true,
///   "strip_punctuation": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    ///
    /// The version is mixed into the identity hash:
    /// ```text
    /// SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
    /// ```
    pub version: u32,

    /// Map typographic punctuation to its plain ASCII form.
    ///
    /// Word processors emit curly quotes and en/em dashes where LaTeX output
    /// often carries straight ones (or the other way around):
    /// ```text
    /// "\u{201C}quoted\u{201D}" → "\"quoted\""
    /// "pages 3\u{2013}5"       → "pages 3-5"
    /// ```
    pub fold_typography: bool,

    /// Remove lines that contain nothing but a page number.
    ///
    /// Matches `12`, `page 12` and `12 / 40` on a line of their own. Only
    /// applies to text that still has line breaks, so canonical text (which
    /// never does) is left untouched.
    pub drop_page_numbers: bool,

    /// Remove running section headers that sit alone on a line.
    ///
    /// Matches `Chapter`, `CHAPTER`, `Abstract`, `References` and `Resumen`
    /// as the whole line, case-sensitively. Like `drop_page_numbers` it only
    /// sees text that still has line breaks.
    pub drop_heading_lines: bool,

    /// Re-join words split by a line-end hyphen.
    ///
    /// After whitespace has been collapsed, a `-` that directly follows a
    /// letter and is followed by one space and a lower-case letter is removed
    /// together with the space:
    /// ```text
    /// "manu-\nscript" → "manu- script" → "manuscript"
    /// ```
    ///
    /// Genuine compounds broken at a line end (`well-\nknown`) are joined
    /// too; the same happens on both sides of a comparison.
    pub strip_hyphenation: bool,

    /// Treat every Unicode punctuation character as a delimiter.
    ///
    /// ```text
    /// "Hello, world!" → "hello world"
    /// ```
    ///
    /// Sentence segmentation relies on terminal punctuation, so enabling this
    /// collapses a document into a single sentence unit.
    pub strip_punctuation: bool,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            fold_typography: true,
            drop_page_numbers: true,
            drop_heading_lines: true,
            strip_hyphenation: true,
            strip_punctuation: false,
        }
    }
}

impl CanonicalizeConfig {
    /// Reject configurations that cannot produce a versioned document.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for sentence segmentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SegmentConfig {
    /// Fragments shorter than this many characters are merged with the
    /// following unit. Initials (`j.`), abbreviations (`e.g.`) and list
    /// markers (`1.`) would otherwise become units of their own.
    pub min_sentence_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: 10,
        }
    }
}

impl SegmentConfig {
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.min_sentence_chars == 0 {
            return Err(CanonicalError::InvalidConfig(
                "min_sentence_chars must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
