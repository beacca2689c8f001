//! Canonical text layer for document comparison.
//!
//! Turns raw extracted text into a deterministic, versioned form that both
//! sides of a comparison share, and splits it into sentence units.
//!
//! ## What we do
//!
//! - Unicode NFKC and typographic folding (quotes, dashes)
//! - Removal of invisible and control characters, page-number lines and
//!   running section headers
//! - Case folding and whitespace collapsing (always on)
//! - Line-end hyphenation repair and optional punctuation stripping
//! - Tokenization with byte offsets and a version-aware identity hash
//! - Sentence segmentation with a minimum-length guard
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale. The same text and config give the same
//! result on any machine, and normalizing canonical text again is a no-op.
//!
//! Nothing here knows whether text came from a PDF or a DOCX file.

mod cleanup;
mod config;
mod document;
mod error;
mod hash;
mod pipeline;
mod segment;
mod snippet;
mod token;

pub use crate::config::{CanonicalizeConfig, SegmentConfig};
pub use crate::document::CanonicalizedDocument;
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::pipeline::{canonicalize, normalize};
pub use crate::segment::{segment, SentenceUnit, Sentences};
pub use crate::snippet::truncate_chars;
pub use crate::token::{tokenize, Token};
