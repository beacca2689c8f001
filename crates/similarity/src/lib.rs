//! # Similarity engine
//!
//! Compares two canonical texts (PDF side `a`, DOCX side `b`) and reports:
//!
//! - `char_ratio`: Indel similarity `2 * LCS / (|a| + |b|)` over characters,
//!   computed with a bit-parallel LCS.
//! - `token_fuzzy_ratio`: the same ratio over whitespace tokens sorted on each
//!   side, so reordered words do not count as changes.
//! - `sentence_coverage`: the fraction of PDF sentences found somewhere in the
//!   DOCX text at or above [`SimilarityConfig::sentence_threshold`]. Each
//!   sentence is matched on its own, so paragraph moves on the DOCX side are
//!   tolerated.
//!
//! A word-level diff ([`diff_texts`]) aligns the two texts for display.
//!
//! ## Contract
//!
//! Both texts must have been canonicalized with the same policy. Every
//! function here is total: empty texts yield the edge values documented on
//! [`compare`] rather than errors, and nothing performs I/O.
//!
//! ```
//! use canonical::{segment, SegmentConfig};
//! use similarity::{compare, SimilarityConfig};
//!
//! let pdf = "the quick brown fox. it jumps daily.";
//! let docx = "the quick brown fox. it jumps every day.";
//! let sentences: Vec<_> = segment(pdf, &SegmentConfig::default()).collect();
//!
//! let metrics = compare(pdf, docx, &sentences, &SimilarityConfig::default());
//! assert_eq!(metrics.total_sentences, 2);
//! assert_eq!(metrics.matched_sentences, 1);
//! assert_eq!(metrics.sentence_coverage, 0.5);
//! ```

mod config;
mod coverage;
mod diff;
mod lcs;
mod ratio;
mod types;

use std::time::Instant;

use canonical::SentenceUnit;
use tracing::{debug, Level};

pub use crate::config::{CoverageStrategy, SimilarityConfig, SimilarityError};
pub use crate::diff::{diff_texts, DiffSpan, DiffTag};
pub use crate::ratio::{char_ratio, token_sort_ratio};
pub use crate::types::{ComparisonOutcome, SentenceMatch, SimilarityMetrics};

/// Compute the three similarity metrics of `a` against `b`.
///
/// `sentences_a` are the sentence units of `a`; only they are looked up in `b`.
///
/// Edge values:
/// - two empty texts: every metric is 1.0
/// - one empty text: both ratios are 0.0
/// - no sentences in `sentences_a`: coverage is 1.0
/// - sentences but an empty `b`: coverage is 0.0
pub fn compare(
    a: &str,
    b: &str,
    sentences_a: &[SentenceUnit],
    cfg: &SimilarityConfig,
) -> SimilarityMetrics {
    let (metrics, _) = compute(a, b, sentences_a, cfg);
    metrics
}

/// [`compare`] plus per-sentence scores and the word diff of `a` and `b`.
pub fn compare_with_details(
    a: &str,
    b: &str,
    sentences_a: &[SentenceUnit],
    cfg: &SimilarityConfig,
) -> ComparisonOutcome {
    let (metrics, sentence_matches) = compute(a, b, sentences_a, cfg);
    let start = Instant::now();
    let diff = diff_texts(a, b);
    debug!(
        spans = diff.len(),
        changed = diff.iter().filter(|span| !span.is_equal()).count(),
        elapsed_micros = start.elapsed().as_micros(),
        "diff_computed"
    );
    ComparisonOutcome {
        metrics,
        sentence_matches,
        diff,
    }
}

fn compute(
    a: &str,
    b: &str,
    sentences_a: &[SentenceUnit],
    cfg: &SimilarityConfig,
) -> (SimilarityMetrics, Vec<SentenceMatch>) {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "similarity.compare",
        strategy = ?cfg.coverage_strategy,
        threshold = cfg.sentence_threshold
    );
    let _guard = span.enter();

    let (char_ratio, token_fuzzy_ratio) = if cfg.use_parallel {
        rayon::join(|| char_ratio(a, b), || token_sort_ratio(a, b))
    } else {
        (char_ratio(a, b), token_sort_ratio(a, b))
    };

    let matches = coverage::match_sentences(sentences_a, b, cfg);
    let total_sentences = matches.len();
    let matched_sentences = matches.iter().filter(|m| m.matched).count();
    let sentence_coverage = if total_sentences == 0 {
        1.0
    } else {
        matched_sentences as f64 / total_sentences as f64
    };

    let metrics = SimilarityMetrics {
        char_ratio,
        token_fuzzy_ratio,
        sentence_coverage,
        total_sentences,
        matched_sentences,
    };
    tracing::info!(
        char_ratio,
        token_fuzzy_ratio,
        sentence_coverage,
        total_sentences,
        matched_sentences,
        elapsed_micros = start.elapsed().as_micros(),
        "compare_success"
    );
    (metrics, matches)
}
