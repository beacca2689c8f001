//! The output of the normalization stage.
//!
//! For a fixed configuration and input text every field of
//! [`CanonicalizedDocument`] is deterministic, so two runs over the same file
//! produce the same identity hash.
//!
//! ```rust
//! use canonical::{canonicalize, CanonicalizeConfig};
//!
//! let doc = canonicalize("paper.pdf", "Hello  World", &CanonicalizeConfig::default()).unwrap();
//! assert_eq!(doc.canonical_text, "hello world");
//! assert_eq!(doc.tokens.len(), 2);
//! assert_eq!(doc.sha256_hex.len(), 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{CanonicalizeConfig, SegmentConfig};
use crate::segment::{segment, Sentences};
use crate::token::Token;

/// Canonical representation of one extracted document.
///
/// ```text
/// CanonicalizedDocument
/// ├── doc_id: String                    # usually the source file name
/// ├── canonical_text: String            # normalized text
/// ├── tokens: Vec<Token>                # whitespace tokens, input to token ratios
/// ├── sha256_hex: String                # version-aware identity hash
/// ├── canonical_version: u32
/// └── config: CanonicalizeConfig        # policy snapshot
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizedDocument {
    /// Identifier copied from the `doc_id` argument of
    /// [`canonicalize()`](crate::canonicalize), trimmed.
    pub doc_id: String,

    /// Normalized text. May be empty when the source yielded no text.
    pub canonical_text: String,

    /// Token stream with UTF-8 byte offsets into `canonical_text`.
    pub tokens: Vec<Token>,

    /// Identity hash:
    /// ```text
    /// SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
    /// ```
    pub sha256_hex: String,

    /// Copy of [`CanonicalizeConfig::version`].
    pub canonical_version: u32,

    /// Normalization policy used to build this document; reports echo it
    /// next to the metrics.
    pub config: CanonicalizeConfig,
}

impl CanonicalizedDocument {
    /// Sentence units of the canonical text.
    pub fn sentences<'a>(&'a self, cfg: &SegmentConfig) -> Sentences<'a> {
        segment(&self.canonical_text, cfg)
    }

    pub fn is_empty(&self) -> bool {
        self.canonical_text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.canonical_text.chars().count()
    }
}
